//! Customer registry.
//!
//! Routes mounted under `/api/customers`:
//! - `GET ""` paginated list filtered by `name`, `person_kind` and `tax_id`;
//!   `POST ""` registers a customer and links entries carrying its name.
//! - `GET /search?term=` autocomplete suggestions.
//! - `GET /export` and `POST /import` spreadsheet transfer.
//! - `POST /bulk` bulk delete.
//! - `GET|PUT|DELETE /{id}`.

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

mod list;
mod remove;
mod save;
mod transfer;

const API_PATH: &str = "/api/customers";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/search", get().to(list::search))
        .route("/export", get().to(transfer::export))
        .route("/import", post().to(transfer::import))
        .route("/bulk", post().to(remove::bulk))
        .route("/{id}", get().to(list::detail))
        .route("/{id}", put().to(save::update))
        .route("/{id}", delete().to(remove::process))
}
