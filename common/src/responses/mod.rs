use crate::model::customer::Customer;
use crate::model::dashboard::DashboardData;
use crate::model::entry::Entry;
use crate::model::page::Page;
use crate::model::romaneio::RomaneioRecord;
use serde::{Deserialize, Serialize};

/// Envelope returned by every JSON action: `{success, message, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardData>,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        ActionResponse {
            success: true,
            message: message.into(),
            dashboard: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ActionResponse {
            success: false,
            message: message.into(),
            dashboard: None,
        }
    }

    pub fn with_dashboard(mut self, dashboard: impl Into<Option<DashboardData>>) -> Self {
        self.dashboard = dashboard.into();
        self
    }
}

/// Outcome of a spreadsheet import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub added: u32,
    pub ignored: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RomaneioResponse {
    pub success: bool,
    pub message: String,
    pub records: Vec<RomaneioRecord>,
}

/// Active orders and quotes shown on the control panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryPanel {
    pub orders: Vec<Entry>,
    pub quotes: Vec<Entry>,
    pub dashboard: DashboardData,
}

/// Archived entries, paginated per kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedEntries {
    pub orders: Page<Entry>,
    pub quotes: Page<Entry>,
}

/// A created or updated customer plus the entries that were linked to it
/// through their temporary customer name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSaved {
    pub customer: Customer,
    pub linked_entries: usize,
}

/// Result of a spreadsheet import action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub summary: ImportSummary,
}

impl ImportResponse {
    pub fn new(summary: ImportSummary, what: &str) -> Self {
        let message = if summary.added == 0 && summary.ignored == 0 {
            "No new data to import was found in the file.".to_string()
        } else {
            format!(
                "{} {} imported, {} ignored because they already exist.",
                summary.added, what, summary.ignored
            )
        };
        ImportResponse {
            success: true,
            message,
            summary,
        }
    }
}
