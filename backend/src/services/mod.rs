//! HTTP surface of the application.
//!
//! Each area lives in its own module exposing `configure_routes()`, which
//! returns an actix `Scope` mounted under the area's `API_PATH`. Handlers are
//! thin: they authenticate through the extractors in `crate::auth`, run the
//! store operation inside one `Store::write` transaction, and only after the
//! commit touch the file system or ping the change notifier.

pub mod attachments;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod entries;
pub mod reports;
pub mod upload;
pub mod users;

use crate::error::{AppError, AppResult};
use crate::spreadsheet::SheetFormat;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use common::requests::BulkActionRequest;

/// Mounts every API scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::configure_routes())
        .service(users::configure_routes())
        .service(entries::configure_routes())
        .service(customers::configure_routes())
        .service(attachments::configure_routes())
        .service(dashboard::configure_routes())
        .service(reports::configure_routes());
}

/// Runs CPU-bound work (hashing, PDF and spreadsheet codecs) on the
/// blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {}", e)))?
}

/// A spreadsheet download.
pub(crate) fn sheet_response(format: SheetFormat, basename: &str, bytes: Vec<u8>) -> HttpResponse {
    let filename = format!("{}.{}", basename, format.extension());
    HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(bytes)
}

/// Ids of a bulk request; empty or non-numeric lists are rejected.
pub(crate) fn parse_ids(request: &BulkActionRequest) -> AppResult<Vec<i64>> {
    if request.ids.is_empty() {
        return Err(AppError::Validation("No items were selected".to_string()));
    }
    request
        .ids
        .iter()
        .map(|id| {
            id.as_id()
                .ok_or_else(|| AppError::Validation("Invalid id in selection".to_string()))
        })
        .collect()
}
