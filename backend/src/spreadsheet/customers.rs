use super::{cell, Cell};
use crate::db::customers::{self, CustomerFields};
use crate::error::{AppError, AppResult};
use common::model::customer::{Customer, PersonKind};
use common::responses::ImportSummary;
use log::info;
use rusqlite::Connection;

pub const SHEET_NAME: &str = "Clientes";

pub const HEADER: [&str; 14] = [
    "N° Cliente",
    "Nome",
    "Telefone",
    "Tipo Pessoa",
    "CPF/CNPJ",
    "Como Conheceu",
    "Rua",
    "Número",
    "Complemento",
    "Bairro",
    "Cidade",
    "UF",
    "CEP",
    "Observações",
];

pub fn to_row(customer: &Customer) -> Vec<Cell> {
    vec![
        Cell::Number(customer.customer_number),
        customer.name.clone().into(),
        customer.phone.clone().into(),
        customer.person_kind.label().into(),
        customer.tax_id.clone().into(),
        customer.referral_source.clone().into(),
        customer.street.clone().into(),
        customer.street_number.clone().into(),
        customer.complement.clone().into(),
        customer.district.clone().into(),
        customer.city.clone().into(),
        customer.state.clone().into(),
        customer.postal_code.clone().into(),
        customer.notes.clone().into(),
    ]
}

/// Whether the sheet starts with the customer number column of an export.
fn has_number_column(header: &[String]) -> bool {
    header
        .first()
        .map(|title| {
            let title = title.to_lowercase();
            title.starts_with('n') && title.contains("cliente")
        })
        .unwrap_or(false)
}

/// Maps one data row; `None` when the row has no name.
fn fields_from_row(row: &[String], offset: usize) -> Option<CustomerFields> {
    let at = |idx: usize| cell(row, offset + idx);
    let name = at(0)?;
    Some(CustomerFields {
        name,
        phone: at(1),
        person_kind: at(2)
            .and_then(|label| label.parse().ok())
            .unwrap_or(PersonKind::Individual),
        tax_id: at(3),
        referral_source: at(4),
        street: at(5),
        street_number: at(6),
        complement: at(7),
        district: at(8),
        city: at(9),
        state: at(10),
        postal_code: at(11),
        notes: at(12),
    })
}

/// Imports customer rows, header first. Taken names or tax ids are counted
/// as ignored; rows without a name are skipped.
pub fn import(conn: &Connection, rows: &[Vec<String>]) -> AppResult<ImportSummary> {
    let mut summary = ImportSummary::default();
    let Some((header, data)) = rows.split_first() else {
        return Ok(summary);
    };
    let offset = usize::from(has_number_column(header));

    for row in data {
        let Some(fields) = fields_from_row(row, offset) else {
            continue;
        };
        match customers::insert(conn, &fields) {
            Ok(customer) => {
                customers::link_temporary_entries(conn, &customer)?;
                summary.added += 1;
            }
            Err(AppError::Validation(_)) => summary.ignored += 1,
            Err(e) => return Err(e),
        }
    }
    info!(
        "Customer import: {} added, {} ignored",
        summary.added, summary.ignored
    );
    Ok(summary)
}
