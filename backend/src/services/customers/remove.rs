use crate::auth::CurrentUser;
use crate::db::customers;
use crate::error::{AppError, AppResult};
use crate::services::parse_ids;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::BulkActionRequest;
use common::responses::ActionResponse;
use log::info;

pub(crate) async fn process(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let customer = state.store.write(|tx| customers::delete(tx, id))?;
    info!("Customer {} deleted by {}", customer.name, user.username);
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(ActionResponse::ok(format!(
        "Customer \"{}\" deleted",
        customer.name
    ))))
}

pub(crate) async fn bulk(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    body: web::Json<BulkActionRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    if request.action != "delete" {
        return Err(AppError::Validation(format!(
            "Invalid action '{}'",
            request.action
        )));
    }
    let ids = parse_ids(&request)?;
    let count = state.store.write(|tx| customers::delete_many(tx, &ids))?;
    info!("{} customers deleted in bulk by {}", count, user.username);
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(ActionResponse::ok(format!("{} customers deleted", count))))
}
