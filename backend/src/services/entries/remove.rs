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
    let (entry, files) = state
        .store
        .write(|tx| entries::delete(tx, id.into_inner()))?;
    state.files.delete_all(&files);
    info!(
        "{} {} deleted by {} ({} file(s) removed)",
        entry.kind,
        entry.order_number,
        user.username,
        files.len()
    );
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(
        ActionResponse::ok(format!("{} {} deleted", entry.kind, entry.order_number))
            .with_dashboard(state.dashboard_after_commit()),
    ))
}
