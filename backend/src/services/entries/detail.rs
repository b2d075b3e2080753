use super::load_detail;
use crate::auth::CurrentUser;
use crate::error::AppResult;
use crate::state::AppState;
use actix_web::{web, HttpResponse};

pub(crate) async fn process(
    _user: CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(load_detail(&state, id.into_inner())?))
}
