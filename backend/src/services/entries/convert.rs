use crate::auth::CurrentUser;
use crate::db::entries;
use crate::error::AppResult;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::responses::ActionResponse;
use log::info;

pub(crate) async fn process(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let entry = state
        .store
        .write(|tx| entries::convert_to_order(tx, id.into_inner()))?;
    info!("Quote {} converted to an order by {}", entry.order_number, user.username);
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(
        ActionResponse::ok(format!("Quote {} converted to an order", entry.order_number))
            .with_dashboard(state.dashboard_after_commit()),
    ))
}
