use crate::model::attachment::Attachment;
use crate::model::UnknownLabel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an entry is a confirmed order ("Pedido") or a quote ("Orçamento").
///
/// Both kinds share one table and one order-number space, so uniqueness and
/// status rules are enforced in a single place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "Pedido")]
    Order,
    #[serde(rename = "Orçamento")]
    Quote,
}

impl EntryKind {
    pub const ALL: [EntryKind; 2] = [EntryKind::Order, EntryKind::Quote];

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Order => "Pedido",
            EntryKind::Quote => "Orçamento",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntryKind {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pedido" => Ok(EntryKind::Order),
            "Orçamento" => Ok(EntryKind::Quote),
            other => Err(UnknownLabel {
                kind: "entry kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Workflow status of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntryStatus {
    #[default]
    #[serde(rename = "Não iniciado")]
    NotStarted,
    #[serde(rename = "Em andamento")]
    InProgress,
    #[serde(rename = "Concluído")]
    Done,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 3] = [
        EntryStatus::NotStarted,
        EntryStatus::InProgress,
        EntryStatus::Done,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::NotStarted => "Não iniciado",
            EntryStatus::InProgress => "Em andamento",
            EntryStatus::Done => "Concluído",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntryStatus {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryStatus::ALL
            .into_iter()
            .find(|status| status.label() == s.trim())
            .ok_or_else(|| UnknownLabel {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Who an entry belongs to.
///
/// An entry either points at a registered customer or carries a free-text
/// name typed by the user. Holding both (or neither) is not representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CustomerLink {
    Registered { id: i64, name: String },
    Temporary { name: String },
}

impl CustomerLink {
    pub fn display_name(&self) -> &str {
        match self {
            CustomerLink::Registered { name, .. } => name,
            CustomerLink::Temporary { name } => name,
        }
    }

    pub fn customer_id(&self) -> Option<i64> {
        match self {
            CustomerLink::Registered { id, .. } => Some(*id),
            CustomerLink::Temporary { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub kind: EntryKind,
    pub order_number: i64,
    pub registered_at: NaiveDateTime,
    pub customer: CustomerLink,
    pub job_site: Option<String>,
    pub status: EntryStatus,
    pub description: String,
    pub notes: Option<String>,
    pub archived: bool,
}

/// An entry together with the files attached to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDetail {
    pub entry: Entry,
    pub attachments: Vec<Attachment>,
}
