use crate::model::entry::EntryStatus;
use serde::{Deserialize, Serialize};

/// Counts of non-archived entries of one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub total: u64,
    pub not_started: u64,
    pub in_progress: u64,
    pub done: u64,
}

impl KindCounts {
    pub fn add(&mut self, status: EntryStatus, count: u64) {
        self.total += count;
        match status {
            EntryStatus::NotStarted => self.not_started += count,
            EntryStatus::InProgress => self.in_progress += count,
            EntryStatus::Done => self.done += count,
        }
    }
}

/// Snapshot pushed to dashboards and returned by the status endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub orders: KindCounts,
    pub quotes: KindCounts,
}
