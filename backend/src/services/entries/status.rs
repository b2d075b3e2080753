use crate::auth::CurrentUser;
use crate::db::entries;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::entry::EntryStatus;
use common::requests::StatusUpdateRequest;
use common::responses::ActionResponse;
use log::info;

pub(crate) async fn process(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<StatusUpdateRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let status: EntryStatus = body
        .status
        .parse()
        .map_err(|_| AppError::Validation("Invalid status".to_string()))?;

    let entry = state.store.write(|tx| entries::set_status(tx, id, status))?;
    info!(
        "Entry {} status set to '{}' by {}",
        entry.order_number, status, user.username
    );
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(
        ActionResponse::ok("Status updated successfully")
            .with_dashboard(state.dashboard_after_commit()),
    ))
}
