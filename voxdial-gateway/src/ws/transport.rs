//! Transport seam between the channel driver and the network.

use async_trait::async_trait;
use futures::{Sink, SinkExt, Stream, StreamExt, future};
use std::pin::Pin;
use std::time::Duration;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::tungstenite::protocol::Message as TungsteniteMessage;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use voxdial_core::error::NetworkError;

use super::message::{CloseReason, WebSocketMessage};

type FrameSink = Pin<Box<dyn Sink<WebSocketMessage, Error = NetworkError> + Send>>;
type FrameStream = Pin<Box<dyn Stream<Item = Result<WebSocketMessage, NetworkError>> + Send>>;

/// One open duplex connection.
pub struct Transport {
    pub(crate) sink: FrameSink,
    pub(crate) stream: FrameStream,
}

impl Transport {
    /// Wraps a frame sink and a frame stream.
    pub fn new<S, R>(sink: S, stream: R) -> Self
    where
        S: Sink<WebSocketMessage, Error = NetworkError> + Send + 'static,
        R: Stream<Item = Result<WebSocketMessage, NetworkError>> + Send + 'static,
    {
        Self {
            sink: Box::pin(sink),
            stream: Box::pin(stream),
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport").finish_non_exhaustive()
    }
}

/// Opens transports. The channel calls this once per connection attempt.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Dials `url`, which already carries the credential.
    async fn connect(&self, url: &str) -> Result<Transport, NetworkError>;
}

/// Connector backed by `tokio-tungstenite`.
#[derive(Debug, Clone)]
pub struct TungsteniteConnector {
    connect_timeout: Duration,
}

impl TungsteniteConnector {
    /// Creates a connector that abandons handshakes after `connect_timeout`.
    #[must_use]
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for TungsteniteConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl Connector for TungsteniteConnector {
    async fn connect(&self, url: &str) -> Result<Transport, NetworkError> {
        let (ws_stream, _response) = timeout(self.connect_timeout, connect_async(url))
            .await
            .map_err(|_| NetworkError::Timeout {
                timeout_ms: u64::try_from(self.connect_timeout.as_millis()).unwrap_or(u64::MAX),
            })?
            .map_err(connect_error)?;

        let (sink, stream) = ws_stream.split();

        let sink = sink
            .with(|message: WebSocketMessage| {
                future::ready(Ok::<_, WsError>(to_tungstenite_message(message)))
            })
            .sink_map_err(|e| NetworkError::WebSocket {
                reason: e.to_string(),
            });

        let stream = stream.filter_map(|frame| {
            future::ready(match frame {
                Ok(message) => from_tungstenite_message(message).map(Ok),
                Err(e) => Some(Err(NetworkError::WebSocket {
                    reason: e.to_string(),
                })),
            })
        });

        Ok(Transport::new(sink, stream))
    }
}

fn connect_error(error: WsError) -> NetworkError {
    match error {
        WsError::Http(response) => NetworkError::Http {
            status_code: response.status().as_u16(),
            reason: "WebSocket handshake rejected".to_string(),
        },
        other => NetworkError::ConnectionFailed {
            reason: other.to_string(),
        },
    }
}

fn to_tungstenite_message(message: WebSocketMessage) -> TungsteniteMessage {
    match message {
        WebSocketMessage::Text(s) => TungsteniteMessage::Text(s),
        WebSocketMessage::Binary(b) => TungsteniteMessage::Binary(b),
        WebSocketMessage::Ping(b) => TungsteniteMessage::Ping(b),
        WebSocketMessage::Pong(b) => TungsteniteMessage::Pong(b),
        WebSocketMessage::Close(reason) => TungsteniteMessage::Close(reason.map(|r| CloseFrame {
            code: CloseCode::from(r.code),
            reason: r.reason.into(),
        })),
    }
}

fn from_tungstenite_message(message: TungsteniteMessage) -> Option<WebSocketMessage> {
    match message {
        TungsteniteMessage::Text(s) => Some(WebSocketMessage::Text(s)),
        TungsteniteMessage::Binary(b) => Some(WebSocketMessage::Binary(b)),
        TungsteniteMessage::Ping(b) => Some(WebSocketMessage::Ping(b)),
        TungsteniteMessage::Pong(b) => Some(WebSocketMessage::Pong(b)),
        TungsteniteMessage::Close(frame) => Some(WebSocketMessage::Close(frame.map(|f| {
            CloseReason {
                code: f.code.into(),
                reason: f.reason.to_string(),
            }
        }))),
        TungsteniteMessage::Frame(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testing::serve;
    use crate::ws::{ChannelBuilder, Handlers, RetryPolicy};
    use axum::Router;
    use axum::extract::Query;
    use axum::extract::ws::{self, WebSocket, WebSocketUpgrade};
    use axum::response::Response;
    use axum::routing::get;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Greets with the received token, echoes one text frame, then closes.
    async fn upgrade(ws: WebSocketUpgrade, Query(params): Query<HashMap<String, String>>) -> Response {
        let token = params.get("token").cloned().unwrap_or_default();
        ws.on_upgrade(move |socket| session(socket, token))
    }

    async fn session(mut socket: WebSocket, token: String) {
        let greeting = format!(r#"{{"type":"auth","data":{{"token":"{token}"}}}}"#);
        if socket.send(ws::Message::Text(greeting)).await.is_err() {
            return;
        }
        if let Some(Ok(ws::Message::Text(text))) = socket.recv().await {
            let _ = socket.send(ws::Message::Text(text)).await;
        }
        let _ = socket
            .send(ws::Message::Close(Some(ws::CloseFrame {
                code: 1000,
                reason: "bye".into(),
            })))
            .await;
    }

    async fn ws_endpoint() -> String {
        let base = serve(Router::new().route("/ws", get(upgrade))).await;
        format!("{}/ws", base.replacen("http", "ws", 1))
    }

    #[test]
    fn test_message_conversion() {
        let text = to_tungstenite_message(WebSocketMessage::text(r#"{"a":1}"#));
        assert!(matches!(text, TungsteniteMessage::Text(ref s) if s == r#"{"a":1}"#));

        let pong = to_tungstenite_message(WebSocketMessage::Pong(vec![1]));
        assert!(matches!(pong, TungsteniteMessage::Pong(_)));

        let close = to_tungstenite_message(WebSocketMessage::close(1000, "bye"));
        assert!(matches!(close, TungsteniteMessage::Close(Some(_))));
    }

    #[test]
    fn test_from_tungstenite_message() {
        let frame = from_tungstenite_message(TungsteniteMessage::Text("hello".to_string()));
        assert_eq!(frame, Some(WebSocketMessage::text("hello")));

        let frame = from_tungstenite_message(TungsteniteMessage::Close(None));
        assert_eq!(frame, Some(WebSocketMessage::Close(None)));
    }

    #[tokio::test]
    async fn test_round_trip_over_websocket() {
        let url = format!("{}?token=tok%20123", ws_endpoint().await);
        let Transport {
            mut sink,
            mut stream,
        } = TungsteniteConnector::default().connect(&url).await.unwrap();

        let greeting = stream.next().await.unwrap().unwrap();
        assert_eq!(
            greeting,
            WebSocketMessage::text(r#"{"type":"auth","data":{"token":"tok 123"}}"#)
        );

        sink.send(WebSocketMessage::text(r#"{"type":"subscribe"}"#))
            .await
            .unwrap();
        assert_eq!(
            stream.next().await.unwrap().unwrap(),
            WebSocketMessage::text(r#"{"type":"subscribe"}"#)
        );
        assert_eq!(
            stream.next().await.unwrap().unwrap(),
            WebSocketMessage::close(1000, "bye")
        );
    }

    #[tokio::test]
    async fn test_channel_delivers_token_and_envelopes() {
        let endpoint = ws_endpoint().await;
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let handlers = Handlers::new().with_message(move |envelope| {
            let _ = tx.send(envelope);
        });

        let channel = ChannelBuilder::new(endpoint)
            .token("tok 123")
            .retry_policy(RetryPolicy::new(Duration::from_secs(60), 0))
            .open(Arc::new(handlers))
            .unwrap();

        let envelope = timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(envelope.kind, "auth");
        assert_eq!(envelope.payload["token"], "tok 123");

        channel.send(&serde_json::json!({ "type": "echo", "data": { "n": 1 } }));
        let echoed = timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(echoed.kind, "echo");
        assert_eq!(echoed.payload["n"], 1);
        channel.close();
    }

    #[tokio::test]
    async fn test_connect_refused_maps_to_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let connector = TungsteniteConnector::new(Duration::from_secs(2));
        let err = connector
            .connect(&format!("ws://{addr}/ws"))
            .await
            .unwrap_err();
        assert!(err.is_recoverable());
    }
}
