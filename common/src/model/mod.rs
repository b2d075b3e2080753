pub mod attachment;
pub mod customer;
pub mod dashboard;
pub mod entry;
pub mod page;
pub mod romaneio;
pub mod user;

use thiserror::Error;

/// Returned when a label coming from a form, a spreadsheet cell or a database
/// column does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}
