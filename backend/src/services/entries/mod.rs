//! Orders and quotes ("entradas").
//!
//! Routes mounted under `/api/entries`:
//! - `GET ""` active panel (orders and quotes plus dashboard counts), `POST ""`
//!   create from a multipart form (`json` part plus `anexos` files).
//! - `GET /archived` archived entries paginated per kind.
//! - `POST /bulk` and `POST /archived/bulk` bulk actions.
//! - `GET /export` and `POST /import` spreadsheet transfer.
//! - `GET|PUT|DELETE /{id}` and the `/{id}/status|convert|archive|restore`
//!   actions.
//!
//! The static paths are registered before `/{id}` so they are never captured
//! as an id.

use crate::db::attachments;
use crate::error::AppResult;
use crate::services::upload::UploadedFile;
use crate::state::AppState;
use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;
use common::model::entry::EntryDetail;

mod archive;
mod archived;
mod bulk;
mod convert;
mod create;
mod detail;
mod export;
mod import;
mod list;
mod remove;
mod status;
mod update;

const API_PATH: &str = "/api/entries";

/// Multipart part holding the entry form.
const FORM_PART: &str = "json";
/// Multipart part(s) holding attachment files.
const FILES_PART: &str = "anexos";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/archived", get().to(archived::process))
        .route("/archived/bulk", post().to(bulk::process_archived))
        .route("/bulk", post().to(bulk::process))
        .route("/export", get().to(export::process))
        .route("/import", post().to(import::process))
        .route("/{id}", get().to(detail::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(remove::process))
        .route("/{id}/status", post().to(status::process))
        .route("/{id}/convert", post().to(convert::process))
        .route("/{id}/archive", post().to(archive::archive))
        .route("/{id}/restore", post().to(archive::restore))
}

/// Writes uploaded files to disk ahead of the transaction that records
/// them. Returns the stored names.
fn store_files(state: &AppState, files: &[UploadedFile]) -> AppResult<Vec<String>> {
    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        match state.files.save(&file.filename, &file.bytes) {
            Ok(name) => stored.push(name),
            Err(e) => {
                state.files.delete_all(&stored);
                return Err(e);
            }
        }
    }
    Ok(stored)
}

/// Runs `write` (which records `stored` files) and removes the files again
/// when the transaction fails.
fn commit_with_files<T>(
    state: &AppState,
    stored: &[String],
    write: impl FnOnce() -> AppResult<T>,
) -> AppResult<T> {
    write().inspect_err(|_| state.files.delete_all(stored))
}

fn load_detail(state: &AppState, id: i64) -> AppResult<EntryDetail> {
    state.store.read(|conn| {
        Ok(EntryDetail {
            entry: crate::db::entries::get(conn, id)?,
            attachments: attachments::for_entry(conn, id)?,
        })
    })
}
