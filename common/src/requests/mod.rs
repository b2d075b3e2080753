use crate::model::entry::EntryKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Admin-only registration of a new account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Form used to create or edit an order/quote.
///
/// `order_number` stays textual so a non-numeric value can be reported back
/// to the user instead of failing deserialization. Exactly one of
/// `customer_id` and `customer_name` should be filled; the id wins when both
/// are sent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EntryForm {
    pub kind: Option<EntryKind>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub job_site: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub person_kind: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub referral_source: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload of the JSON status action. The status is kept as text so an
/// unknown value produces a regular failure response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub status: String,
}

/// Ids arrive either as JSON numbers or as strings taken from checkboxes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BulkId {
    Number(i64),
    Text(String),
}

impl BulkId {
    pub fn as_id(&self) -> Option<i64> {
        match self {
            BulkId::Number(n) => Some(*n),
            BulkId::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BulkActionRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub ids: Vec<BulkId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_ids_accept_numbers_and_numeric_strings() {
        assert_eq!(BulkId::Number(4).as_id(), Some(4));
        assert_eq!(BulkId::Text(" 12 ".to_string()).as_id(), Some(12));
        assert_eq!(BulkId::Text("doze".to_string()).as_id(), None);
    }
}
