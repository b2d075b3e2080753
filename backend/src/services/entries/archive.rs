use crate::auth::CurrentUser;
use crate::db::entries;
use crate::error::AppResult;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::user::User;
use common::responses::ActionResponse;
use log::info;

pub(crate) async fn archive(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    set_archived(&user, &state, id.into_inner(), true)
}

pub(crate) async fn restore(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    set_archived(&user, &state, id.into_inner(), false)
}

fn set_archived(user: &User, state: &AppState, id: i64, archived: bool) -> AppResult<HttpResponse> {
    let entry = state
        .store
        .write(|tx| entries::set_archived(tx, id, archived))?;
    let verb = if archived { "archived" } else { "restored" };
    info!("{} {} {} by {}", entry.kind, entry.order_number, verb, user.username);
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(
        ActionResponse::ok(format!("{} {} {}", entry.kind, entry.order_number, verb))
            .with_dashboard(state.dashboard_after_commit()),
    ))
}
