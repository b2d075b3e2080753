use crate::auth::AdminUser;
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::responses::ActionResponse;
use log::info;

pub(crate) async fn process(
    AdminUser(admin): AdminUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    if id == admin.id {
        return Err(AppError::Forbidden(
            "You cannot delete your own account".to_string(),
        ));
    }
    let removed = state.store.write(|tx| users::delete(tx, id))?;
    let revoked = state.sessions.remove_user(removed.id);
    info!(
        "User {} deleted by {} ({} session(s) revoked)",
        removed.username, admin.username, revoked
    );
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(ActionResponse::ok(format!(
        "User '{}' deleted",
        removed.username
    ))))
}
