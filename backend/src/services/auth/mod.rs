//! Login, logout and the current-session probe.
//!
//! - `POST /api/auth/login`: checks a username/password pair and sets the
//!   session cookie.
//! - `POST /api/auth/logout`: drops the session and expires the cookie.
//! - `GET /api/auth/me`: the logged-in user, or 401.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod login;
mod logout;
mod me;

const API_PATH: &str = "/api/auth";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/login", post().to(login::process))
        .route("/logout", post().to(logout::process))
        .route("/me", get().to(me::process))
}
