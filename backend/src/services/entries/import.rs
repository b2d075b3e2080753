use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::services::blocking;
use crate::services::upload::read_multipart;
use crate::spreadsheet::{self, SheetFormat};
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::responses::ImportResponse;
use log::info;

/// Multipart part carrying the spreadsheet.
pub(crate) const SHEET_PART: &str = "xlsx_file";

pub(crate) async fn process(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = read_multipart(payload, state.config.max_upload_bytes).await?;
    let file = form.take_file(SHEET_PART)?;
    let format = SheetFormat::from_filename(&file.filename)?;
    let rows = blocking(move || spreadsheet::read(format, &file.bytes)).await?;

    let now = Utc::now().naive_utc();
    let summary = state
        .store
        .write(|tx| spreadsheet::entries::import(tx, &rows, now))?;
    info!(
        "{} imported entries: {} added, {} ignored",
        user.username, summary.added, summary.ignored
    );
    if summary.added > 0 {
        state.notifier.notify();
    }
    Ok(HttpResponse::Ok().json(ImportResponse::new(summary, "entries")))
}
