use super::{cell, Cell, DATE_FORMAT};
use crate::db::entries::{self, CustomerChoice, EntryFields};
use crate::db::customers;
use crate::error::AppResult;
use chrono::NaiveDateTime;
use common::model::entry::{Entry, EntryKind, EntryStatus};
use common::responses::ImportSummary;
use log::info;
use rusqlite::Connection;

pub const ACTIVE_SHEET: &str = "Painel_Controle";
pub const ARCHIVED_SHEET: &str = "Arquivados";

pub const HEADER: [&str; 8] = [
    "N° Pedido",
    "Tipo",
    "Cliente",
    "Obra",
    "Status",
    "Descrição",
    "Observações",
    "Data de Registro",
];

/// Columns an import row must carry: everything but the registration date.
const IMPORT_COLUMNS: usize = 7;

pub fn to_row(entry: &Entry) -> Vec<Cell> {
    vec![
        Cell::Number(entry.order_number),
        entry.kind.label().into(),
        entry.customer.display_name().into(),
        entry.job_site.clone().into(),
        entry.status.label().into(),
        entry.description.clone().into(),
        entry.notes.clone().into(),
        entry.registered_at.format(DATE_FORMAT).to_string().into(),
    ]
}

/// Maps a row onto entry fields, resolving the customer name. `None` when a
/// required cell is missing or malformed.
fn fields_from_row(conn: &Connection, row: &[String]) -> AppResult<Option<EntryFields>> {
    if row.len() < IMPORT_COLUMNS {
        return Ok(None);
    }
    let number = cell(row, 0).and_then(|n| n.parse::<i64>().ok());
    let kind = cell(row, 1).and_then(|k| k.parse::<EntryKind>().ok());
    let (Some(order_number), Some(kind), Some(customer_name), Some(description)) =
        (number, kind, cell(row, 2), cell(row, 5))
    else {
        return Ok(None);
    };

    let customer = match customers::find_by_name(conn, &customer_name)? {
        Some(found) => CustomerChoice::Registered(found.id),
        None => CustomerChoice::Temporary(customer_name),
    };
    Ok(Some(EntryFields {
        kind,
        order_number,
        status: cell(row, 4)
            .and_then(|s| s.parse().ok())
            .unwrap_or(EntryStatus::NotStarted),
        job_site: cell(row, 3),
        description,
        notes: cell(row, 6),
        customer,
    }))
}

/// Imports entry rows, header first, registering them at `now`.
pub fn import(conn: &Connection, rows: &[Vec<String>], now: NaiveDateTime) -> AppResult<ImportSummary> {
    let mut summary = ImportSummary::default();
    for row in rows.iter().skip(1) {
        let Some(fields) = fields_from_row(conn, row)? else {
            continue;
        };
        if entries::number_taken(conn, fields.order_number, None)? {
            summary.ignored += 1;
            continue;
        }
        entries::insert(conn, &fields, now)?;
        summary.added += 1;
    }
    info!(
        "Entry import: {} added, {} ignored",
        summary.added, summary.ignored
    );
    Ok(summary)
}
