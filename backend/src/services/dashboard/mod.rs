//! Dashboard counts.
//!
//! - `GET /api/dashboard`: counts of active orders and quotes per status,
//!   computed on every request.
//! - `GET /api/dashboard/stream`: server-sent events carrying a new snapshot
//!   whenever an entry changed (see `crate::notifier`).

use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::notifier::dashboard_events;
use crate::state::AppState;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};
use log::debug;

const API_PATH: &str = "/api/dashboard";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(snapshot))
        .route("/stream", get().to(stream))
}

async fn snapshot(_user: CurrentUser, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.dashboard()?))
}

async fn stream(CurrentUser(user): CurrentUser, state: web::Data<AppState>) -> HttpResponse {
    debug!("Dashboard stream opened by {}", user.username);
    let events = dashboard_events(
        state.store.clone(),
        state.notifier.clone(),
        state.config.poll_interval,
    );
    HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/event-stream"))
        .insert_header((CACHE_CONTROL, "no-cache"))
        .streaming(events)
}
