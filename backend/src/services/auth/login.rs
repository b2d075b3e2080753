use crate::auth::password::verify_password;
use crate::auth::session::session_cookie;
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::services::blocking;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::user::User;
use common::requests::LoginRequest;
use log::{info, warn};

pub(crate) async fn process(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let user = authenticate(&state, body.into_inner()).await?;
    let session_id = state.sessions.create(user.clone());
    info!("User {} logged in", user.username);
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(session_id, state.sessions.max_age_secs()))
        .json(user))
}

async fn authenticate(state: &AppState, request: LoginRequest) -> AppResult<User> {
    let rejected = || AppError::Unauthorized("Invalid username or password".to_string());
    let username = request.username.trim().to_string();
    let Some(credentials) = state.store.read(|conn| users::find_credentials(conn, &username))? else {
        warn!("Login attempt for unknown user {}", username);
        return Err(rejected());
    };

    let hash = credentials.password_hash;
    let password = request.password;
    if blocking(move || Ok(verify_password(&password, &hash))).await? {
        Ok(credentials.user)
    } else {
        warn!("Wrong password for user {}", username);
        Err(rejected())
    }
}
