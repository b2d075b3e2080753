//! Fixtures shared by the handler tests.

use crate::auth::session::session_cookie;
use crate::config::Config;
use crate::db::{users, Store};
use crate::state::AppState;
use actix_web::cookie::Cookie;
use actix_web::web::Bytes;
use tempfile::TempDir;

pub const BOUNDARY: &str = "entradas-test-boundary";

/// State over an in-memory store with uploads in a temporary directory. Keep
/// the `TempDir` alive for the duration of the test.
pub fn test_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        upload_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let state = AppState::with_store(config, Store::open_in_memory().unwrap()).unwrap();
    (state, dir)
}

/// Registers a user and returns a cookie for a live session of theirs. The
/// stored hash is a placeholder, so these users cannot log in by password.
pub fn login(state: &AppState, username: &str, is_admin: bool) -> Cookie<'static> {
    let user = state
        .store
        .write(|tx| users::insert(tx, username, "placeholder", is_admin))
        .unwrap();
    let session_id = state.sessions.create(user);
    session_cookie(session_id, 3600)
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

/// Encodes a `multipart/form-data` body; returns the content type and body.
pub fn multipart(parts: &[Part<'_>]) -> (String, Bytes) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    (
        format!("multipart/form-data; boundary={}", BOUNDARY),
        Bytes::from(body),
    )
}
