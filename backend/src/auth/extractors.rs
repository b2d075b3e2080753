use crate::auth::session::SESSION_COOKIE_NAME;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use common::model::user::User;
use std::future::{ready, Ready};

/// The user owning the request's session. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// A logged-in administrator. Rejects with 401 or 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

fn session_user(req: &HttpRequest) -> AppResult<User> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state missing".to_string()))?;
    let cookie = req
        .cookie(SESSION_COOKIE_NAME)
        .ok_or_else(|| AppError::Unauthorized("Please log in to continue".to_string()))?;
    state
        .sessions
        .get(cookie.value())
        .map(|session| session.user)
        .ok_or_else(|| AppError::Unauthorized("Your session has expired, please log in again".to_string()))
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(session_user(req).map(CurrentUser))
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(session_user(req).and_then(|user| {
            if user.is_admin {
                Ok(AdminUser(user))
            } else {
                Err(AppError::Forbidden(
                    "Access denied. Only administrators can do this.".to_string(),
                ))
            }
        }))
    }
}
