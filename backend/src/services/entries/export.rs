use crate::auth::CurrentUser;
use crate::db::entries::{self, EntryQuery};
use crate::error::AppResult;
use crate::services::{blocking, sheet_response};
use crate::spreadsheet::entries::{to_row, ACTIVE_SHEET, ARCHIVED_SHEET, HEADER};
use crate::spreadsheet::{self, SheetFormat};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default)]
    archived: bool,
    format: Option<String>,
}

pub(crate) async fn process(
    _user: CurrentUser,
    state: web::Data<AppState>,
    query: web::Query<ExportQuery>,
) -> AppResult<HttpResponse> {
    let format = SheetFormat::from_query(query.format.as_deref())?;
    let archived = query.archived;
    let filter = EntryQuery {
        archived: Some(archived),
        ..EntryQuery::default()
    };
    let rows: Vec<_> = state
        .store
        .read(|conn| entries::select(conn, &filter, "e.order_number"))?
        .iter()
        .map(to_row)
        .collect();

    let (sheet, basename) = if archived {
        (ARCHIVED_SHEET, "arquivados")
    } else {
        (ACTIVE_SHEET, "painel_controle")
    };
    let bytes = blocking(move || spreadsheet::write(format, sheet, &HEADER, &rows)).await?;
    Ok(sheet_response(format, basename, bytes))
}
