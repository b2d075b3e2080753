use crate::auth::AdminUser;
use crate::db::users;
use crate::error::AppResult;
use crate::state::AppState;
use actix_web::{web, HttpResponse};

pub(crate) async fn process(_admin: AdminUser, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let all = state.store.read(users::list)?;
    Ok(HttpResponse::Ok().json(all))
}
