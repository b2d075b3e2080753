mod auth;
mod config;
mod db;
mod error;
mod notifier;
mod romaneio;
mod services;
mod spreadsheet;
mod state;
mod storage;
#[cfg(test)]
mod test_support;

use crate::config::Config;
use crate::db::users;
use crate::error::AppResult;
use crate::state::AppState;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use common::requests::NewUserRequest;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{info, warn};
use mime_guess::from_path;
use std::io;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

/// Creates the first administrator from `ADMIN_USERNAME`/`ADMIN_PASSWORD`
/// when the users table is empty.
async fn bootstrap_admin(state: &AppState) -> AppResult<()> {
    if state.store.read(users::count)? > 0 {
        return Ok(());
    }
    let (Some(username), Some(password)) = (
        state.config.admin_username.clone(),
        state.config.admin_password.clone(),
    ) else {
        warn!("No users registered and ADMIN_USERNAME/ADMIN_PASSWORD not set; nobody can log in");
        return Ok(());
    };
    let admin = services::users::create::register(
        state,
        NewUserRequest {
            username,
            password,
            is_admin: true,
        },
    )
    .await?;
    info!("Administrator {} created", admin.username);
    Ok(())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(io::Error::other)?;
    let state = AppState::new(config).map_err(io::Error::other)?;
    bootstrap_admin(&state).await.map_err(io::Error::other)?;

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let expired = sessions.cleanup_expired();
            if expired > 0 {
                info!("Removed {} expired session(s)", expired);
            }
        }
    });

    let host = state.config.host.clone();
    let port = state.config.port;
    let max_upload_bytes = state.config.max_upload_bytes;
    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::JsonConfig::default().limit(max_upload_bytes))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
            .default_service(web::route().to(serve_embedded))
    })
    .bind((host, port))?
    .run()
    .await
}
