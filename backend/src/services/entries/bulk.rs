use crate::auth::CurrentUser;
use crate::db::entries;
use crate::error::{AppError, AppResult};
use crate::services::parse_ids;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::user::User;
use common::requests::BulkActionRequest;
use common::responses::ActionResponse;
use log::info;

fn invalid_action(action: &str) -> AppError {
    AppError::Validation(format!("Invalid action '{}'", action))
}

/// `archive` or `delete` over any entries.
pub(crate) async fn process(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    body: web::Json<BulkActionRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let ids = parse_ids(&request)?;
    let message = match request.action.as_str() {
        "archive" => {
            let count = state
                .store
                .write(|tx| entries::set_archived_many(tx, &ids, true, false))?;
            format!("{} entries archived", count)
        }
        "delete" => delete(&state, &ids, false)?,
        other => return Err(invalid_action(other)),
    };
    finish(&user, &state, &request.action, message)
}

/// `restore` or `delete` over archived entries only.
pub(crate) async fn process_archived(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    body: web::Json<BulkActionRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let ids = parse_ids(&request)?;
    let message = match request.action.as_str() {
        "restore" => {
            let count = state
                .store
                .write(|tx| entries::set_archived_many(tx, &ids, false, true))?;
            format!("{} entries restored", count)
        }
        "delete" => delete(&state, &ids, true)?,
        other => return Err(invalid_action(other)),
    };
    finish(&user, &state, &request.action, message)
}

fn delete(state: &AppState, ids: &[i64], archived_only: bool) -> AppResult<String> {
    let (count, files) = state
        .store
        .write(|tx| entries::delete_many(tx, ids, archived_only))?;
    state.files.delete_all(&files);
    Ok(format!("{} entries deleted", count))
}

fn finish(user: &User, state: &AppState, action: &str, message: String) -> AppResult<HttpResponse> {
    info!("Bulk {} by {}: {}", action, user.username, message);
    state.notifier.notify();
    Ok(HttpResponse::Ok()
        .json(ActionResponse::ok(message).with_dashboard(state.dashboard_after_commit())))
}
