//! Channel event callbacks.

use async_trait::async_trait;
use voxdial_core::error::NetworkError;

use super::message::InboundEnvelope;

/// Receives channel events.
///
/// All methods default to no-ops. The driver awaits each call before
/// reading the next frame, so callbacks run one at a time in frame order
/// and should return quickly.
#[async_trait]
pub trait ChannelHandler: Send + Sync {
    /// A well-formed envelope arrived.
    async fn on_message(&self, envelope: InboundEnvelope) {
        let _ = envelope;
    }

    /// The channel entered `connected`.
    async fn on_connect(&self) {}

    /// An established connection was lost.
    async fn on_disconnect(&self, reason: Option<String>) {
        let _ = reason;
    }

    /// A connection attempt failed, or the open connection reported an error.
    async fn on_error(&self, error: NetworkError) {
        let _ = error;
    }

    /// A retry is scheduled. `attempt` is 1-based.
    async fn on_reconnecting(&self, attempt: u32, max_attempts: u32) {
        let _ = (attempt, max_attempts);
    }

    /// Retries are used up; the channel stays `disconnected`.
    async fn on_retries_exhausted(&self, attempts: u32) {
        let _ = attempts;
    }
}

type Callback<T> = Box<dyn Fn(T) + Send + Sync>;

/// Closure-based [`ChannelHandler`].
///
/// ```
/// use voxdial_gateway::ws::Handlers;
///
/// let handlers = Handlers::new()
///     .with_message(|envelope| println!("{}", envelope.kind))
///     .with_connect(|| println!("connected"));
/// ```
#[derive(Default)]
pub struct Handlers {
    message: Option<Callback<InboundEnvelope>>,
    connect: Option<Callback<()>>,
    disconnect: Option<Callback<Option<String>>>,
    error: Option<Callback<NetworkError>>,
    reconnecting: Option<Callback<(u32, u32)>>,
    exhausted: Option<Callback<u32>>,
}

impl Handlers {
    /// Creates an empty set of handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message callback.
    #[must_use]
    pub fn with_message(mut self, f: impl Fn(InboundEnvelope) + Send + Sync + 'static) -> Self {
        self.message = Some(Box::new(f));
        self
    }

    /// Sets the connect callback.
    #[must_use]
    pub fn with_connect(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.connect = Some(Box::new(move |()| f()));
        self
    }

    /// Sets the disconnect callback.
    #[must_use]
    pub fn with_disconnect(mut self, f: impl Fn(Option<String>) + Send + Sync + 'static) -> Self {
        self.disconnect = Some(Box::new(f));
        self
    }

    /// Sets the error callback.
    #[must_use]
    pub fn with_error(mut self, f: impl Fn(NetworkError) + Send + Sync + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }

    /// Sets the reconnecting callback, called with `(attempt, max_attempts)`.
    #[must_use]
    pub fn with_reconnecting(mut self, f: impl Fn(u32, u32) + Send + Sync + 'static) -> Self {
        self.reconnecting = Some(Box::new(move |(attempt, max)| f(attempt, max)));
        self
    }

    /// Sets the retries-exhausted callback.
    #[must_use]
    pub fn with_retries_exhausted(mut self, f: impl Fn(u32) + Send + Sync + 'static) -> Self {
        self.exhausted = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers")
            .field("message", &self.message.is_some())
            .field("connect", &self.connect.is_some())
            .field("disconnect", &self.disconnect.is_some())
            .field("error", &self.error.is_some())
            .field("reconnecting", &self.reconnecting.is_some())
            .field("exhausted", &self.exhausted.is_some())
            .finish()
    }
}

#[async_trait]
impl ChannelHandler for Handlers {
    async fn on_message(&self, envelope: InboundEnvelope) {
        if let Some(f) = &self.message {
            f(envelope);
        }
    }

    async fn on_connect(&self) {
        if let Some(f) = &self.connect {
            f(());
        }
    }

    async fn on_disconnect(&self, reason: Option<String>) {
        if let Some(f) = &self.disconnect {
            f(reason);
        }
    }

    async fn on_error(&self, error: NetworkError) {
        if let Some(f) = &self.error {
            f(error);
        }
    }

    async fn on_reconnecting(&self, attempt: u32, max_attempts: u32) {
        if let Some(f) = &self.reconnecting {
            f((attempt, max_attempts));
        }
    }

    async fn on_retries_exhausted(&self, attempts: u32) {
        if let Some(f) = &self.exhausted {
            f(attempts);
        }
    }
}
