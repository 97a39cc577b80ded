//! Contact models.

use serde::{Deserialize, Serialize};

/// Stored contact (`/v1/contacts/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Identifier.
    #[serde(default)]
    pub id: Option<i64>,
    /// Name.
    pub name: String,
    /// Phone number in E.164 form.
    pub phone_number: String,
    /// Free-form tag.
    #[serde(default)]
    pub tag: Option<String>,
    /// Region.
    #[serde(default)]
    pub region: Option<String>,
}

/// Body for creating or updating a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactCreate {
    /// Name.
    pub name: String,
    /// Phone number.
    pub phone_number: String,
    /// Tag.
    pub tag: String,
    /// Region, `global` when not targeted.
    pub region: String,
}

/// Name and number pair, as listed by `GET /v1/contacts/all` and sent in
/// campaign start requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSummary {
    /// Name.
    pub name: String,
    /// Phone number.
    pub phone_number: String,
}

impl From<&Contact> for ContactSummary {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone_number: contact.phone_number.clone(),
        }
    }
}

/// Query filters for `GET /v1/contacts/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilters {
    /// Only contacts in this region.
    pub region: Option<String>,
    /// Only contacts with this tag.
    pub tag: Option<String>,
}

impl ContactFilters {
    /// Returns the query pairs for the set, non-empty filters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [("region", &self.region), ("tag", &self.tag)]
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_nullable_fields() {
        let contact: Contact = serde_json::from_str(
            r#"{"id": null, "name": "Ravi", "phone_number": "+911111111111", "tag": null, "region": "india"}"#,
        )
        .unwrap();
        assert!(contact.id.is_none());
        assert_eq!(contact.region.as_deref(), Some("india"));

        let summary = ContactSummary::from(&contact);
        assert_eq!(summary.phone_number, "+911111111111");
    }

    #[test]
    fn test_filters_query() {
        let filters = ContactFilters {
            region: Some("india".to_string()),
            tag: Some(String::new()),
        };
        assert_eq!(filters.to_query(), vec![("region", "india".to_string())]);
    }
}
