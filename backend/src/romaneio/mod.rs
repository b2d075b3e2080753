//! Romaneio (delivery note) reports.
//!
//! A romaneio PDF lists several orders, each introduced by the column titles
//! `Pedido  Pedido Cli.`. Turning an upload into records is split in two
//! seams so either half can be swapped:
//! - [`TextExtractor`] returns the plain text of every page in page order.
//! - [`ReportParser`] turns the concatenated text into [`RomaneioRecord`]s.

mod extract;
mod parser;

pub use extract::LopdfExtractor;
pub use parser::RomaneioParser;

use crate::error::AppResult;
use common::model::romaneio::RomaneioRecord;

/// Text of a PDF document, one string per page.
pub trait TextExtractor: Send + Sync {
    fn page_texts(&self, bytes: &[u8]) -> AppResult<Vec<String>>;
}

/// Structured records out of report text.
pub trait ReportParser: Send + Sync {
    fn parse(&self, text: &str) -> Vec<RomaneioRecord>;
}

/// Extracts and parses a whole upload.
pub fn process(
    extractor: &dyn TextExtractor,
    parser: &dyn ReportParser,
    bytes: &[u8],
) -> AppResult<Vec<RomaneioRecord>> {
    let text = extractor.page_texts(bytes)?.concat();
    Ok(parser.parse(&text))
}
