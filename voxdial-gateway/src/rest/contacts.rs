//! Contact endpoints.

use serde::Serialize;
use tracing::{debug, info};
use voxdial_core::error::Result;
use voxdial_core::models::{Contact, ContactCreate, ContactFilters, ContactSummary};

use super::client::ApiClient;

#[derive(Serialize)]
struct ContactUpdate<'a> {
    id: i64,
    #[serde(flatten)]
    contact: &'a ContactCreate,
}

impl ApiClient {
    /// `GET /v1/contacts/all`: contacts imported from uploaded lists.
    pub async fn uploaded_contacts(&self) -> Result<Vec<ContactSummary>> {
        let contacts: Vec<ContactSummary> = self.get("/v1/contacts/all").send_json().await?;
        debug!(count = contacts.len(), "Fetched uploaded contacts");
        Ok(contacts)
    }

    /// `GET /v1/contacts/`: individually created contacts.
    pub async fn contacts(&self, filters: &ContactFilters) -> Result<Vec<Contact>> {
        let contacts: Vec<Contact> = self
            .get("/v1/contacts/")
            .queries(filters.to_query())
            .send_json()
            .await?;
        debug!(count = contacts.len(), "Fetched contacts");
        Ok(contacts)
    }

    /// Creates a contact.
    pub async fn create_contact(&self, contact: &ContactCreate) -> Result<Contact> {
        let created: Contact = self.post("/v1/contacts/").json(contact).send_json().await?;
        info!(id = ?created.id, "Contact created");
        Ok(created)
    }

    /// Replaces a contact.
    pub async fn update_contact(&self, id: i64, contact: &ContactCreate) -> Result<Contact> {
        self.put(&format!("/v1/contacts/{id}"))
            .json(&ContactUpdate { id, contact })
            .send_json()
            .await
    }

    /// Deletes a contact and returns the backend's acknowledgement.
    pub async fn delete_contact(&self, id: i64) -> Result<String> {
        let message = self
            .delete(&format!("/v1/contacts/{id}"))
            .send_message()
            .await?;
        info!(id, "Contact deleted");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testing::stub;
    use axum::extract::{Path, Query};
    use axum::routing::{delete, get, put};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    fn body() -> ContactCreate {
        ContactCreate {
            name: "Ada".to_string(),
            phone_number: "+15550100".to_string(),
            tag: "vip".to_string(),
            region: "eu".to_string(),
        }
    }

    #[tokio::test]
    async fn test_contacts_with_filters() {
        let router = Router::new().route(
            "/v1/contacts/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("tag").map(String::as_str), Some("vip"));
                assert!(!params.contains_key("region"));
                Json(json!([
                    {"id": 1, "name": "Ada", "phone_number": "+15550100", "tag": "vip", "region": "eu"}
                ]))
            }),
        );
        let (client, _) = stub(router).await;

        let contacts = client
            .contacts(&ContactFilters {
                region: None,
                tag: Some("vip".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id, Some(1));
    }

    #[tokio::test]
    async fn test_uploaded_contacts() {
        let router = Router::new().route(
            "/v1/contacts/all",
            get(|| async { Json(json!([{"name": "Bo", "phone_number": "+15550101"}])) }),
        );
        let (client, _) = stub(router).await;

        let contacts = client.uploaded_contacts().await.unwrap();
        assert_eq!(contacts[0].name, "Bo");
    }

    #[tokio::test]
    async fn test_update_contact_includes_id() {
        let router = Router::new().route(
            "/v1/contacts/:id",
            put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                assert_eq!(body["id"], id);
                assert_eq!(body["tag"], "vip");
                Json(body)
            }),
        );
        let (client, _) = stub(router).await;

        let updated = client.update_contact(12, &body()).await.unwrap();
        assert_eq!(updated.id, Some(12));
        assert_eq!(updated.region.as_deref(), Some("eu"));
    }

    #[tokio::test]
    async fn test_delete_contact() {
        let router = Router::new().route(
            "/v1/contacts/:id",
            delete(|Path(id): Path<i64>| async move { Json(format!("Contact {id} deleted")) }),
        );
        let (client, _) = stub(router).await;

        assert_eq!(client.delete_contact(3).await.unwrap(), "Contact 3 deleted");
    }
}
