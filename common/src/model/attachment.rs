use serde::{Deserialize, Serialize};

/// A stored file owned by exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub entry_id: i64,
    pub filename: String,
}
