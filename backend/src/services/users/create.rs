use crate::auth::password::hash_password;
use crate::auth::AdminUser;
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::services::blocking;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::user::User;
use common::requests::NewUserRequest;
use log::info;

pub(crate) async fn process(
    AdminUser(admin): AdminUser,
    state: web::Data<AppState>,
    body: web::Json<NewUserRequest>,
) -> AppResult<HttpResponse> {
    let user = register(&state, body.into_inner()).await?;
    info!("User {} registered by {}", user.username, admin.username);
    state.notifier.notify();
    Ok(HttpResponse::Created().json(user))
}

pub(crate) async fn register(state: &AppState, request: NewUserRequest) -> AppResult<User> {
    let username = request.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::Validation("The username is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("The password is required".to_string()));
    }
    let password = request.password;
    let hash = blocking(move || hash_password(&password)).await?;
    state
        .store
        .write(|tx| users::insert(tx, &username, &hash, request.is_admin))
}
