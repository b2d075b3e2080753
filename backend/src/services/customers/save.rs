use crate::auth::CurrentUser;
use crate::db::customers::{self, CustomerFields};
use crate::error::AppResult;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::CustomerForm;
use common::responses::CustomerSaved;
use log::info;

pub(crate) async fn create(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    body: web::Json<CustomerForm>,
) -> AppResult<HttpResponse> {
    let fields = CustomerFields::from_form(body.into_inner())?;
    let saved = state.store.write(|tx| {
        let customer = customers::insert(tx, &fields)?;
        let linked_entries = customers::link_temporary_entries(tx, &customer)?;
        Ok(CustomerSaved {
            customer,
            linked_entries,
        })
    })?;
    info!(
        "Customer {} ({}) registered by {}, {} entries linked",
        saved.customer.name, saved.customer.customer_number, user.username, saved.linked_entries
    );
    state.notifier.notify();
    Ok(HttpResponse::Created().json(saved))
}

pub(crate) async fn update(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<CustomerForm>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let fields = CustomerFields::from_form(body.into_inner())?;
    // Temporary names are only matched when a customer is first registered.
    let customer = state.store.write(|tx| customers::update(tx, id, &fields))?;
    let saved = CustomerSaved {
        customer,
        linked_entries: 0,
    };
    info!("Customer {} updated by {}", saved.customer.customer_number, user.username);
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(saved))
}
