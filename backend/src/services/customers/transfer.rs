use crate::auth::CurrentUser;
use crate::db::customers;
use crate::error::AppResult;
use crate::services::upload::read_multipart;
use crate::services::{blocking, sheet_response};
use crate::spreadsheet::customers::{to_row, HEADER, SHEET_NAME};
use crate::spreadsheet::{self, SheetFormat};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::responses::ImportResponse;
use log::info;
use serde::Deserialize;

const SHEET_PART: &str = "xlsx_file";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    format: Option<String>,
}

pub(crate) async fn export(
    _user: CurrentUser,
    state: web::Data<AppState>,
    query: web::Query<ExportQuery>,
) -> AppResult<HttpResponse> {
    let format = SheetFormat::from_query(query.format.as_deref())?;
    let rows: Vec<_> = state
        .store
        .read(customers::all)?
        .iter()
        .map(to_row)
        .collect();
    let bytes = blocking(move || spreadsheet::write(format, SHEET_NAME, &HEADER, &rows)).await?;
    Ok(sheet_response(format, "cadastro_clientes", bytes))
}

pub(crate) async fn import(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = read_multipart(payload, state.config.max_upload_bytes).await?;
    let file = form.take_file(SHEET_PART)?;
    let format = SheetFormat::from_filename(&file.filename)?;
    let rows = blocking(move || spreadsheet::read(format, &file.bytes)).await?;

    let summary = state
        .store
        .write(|tx| spreadsheet::customers::import(tx, &rows))?;
    info!(
        "{} imported customers: {} added, {} ignored",
        user.username, summary.added, summary.ignored
    );
    if summary.added > 0 {
        state.notifier.notify();
    }
    Ok(HttpResponse::Ok().json(ImportResponse::new(summary, "customers")))
}
