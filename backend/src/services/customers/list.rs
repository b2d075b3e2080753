use crate::auth::CurrentUser;
use crate::db::customers::{self, CustomerFilter};
use crate::db::non_empty;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    name: Option<String>,
    person_kind: Option<String>,
    tax_id: Option<String>,
    page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    term: String,
}

pub(crate) async fn process(
    _user: CurrentUser,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filter = CustomerFilter {
        name: non_empty(query.name),
        person_kind: non_empty(query.person_kind)
            .map(|label| {
                label
                    .parse()
                    .map_err(|e: common::model::UnknownLabel| AppError::Validation(e.to_string()))
            })
            .transpose()?,
        tax_id: non_empty(query.tax_id),
    };
    let page = query.page.unwrap_or(1);
    let result = state
        .store
        .read(|conn| customers::list(conn, &filter, page))?;
    Ok(HttpResponse::Ok().json(result))
}

pub(crate) async fn search(
    _user: CurrentUser,
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let term = query.term.trim();
    if term.is_empty() {
        return Ok(HttpResponse::Ok().json(Vec::<common::model::customer::CustomerSuggestion>::new()));
    }
    let suggestions = state.store.read(|conn| customers::search(conn, term))?;
    Ok(HttpResponse::Ok().json(suggestions))
}

pub(crate) async fn detail(
    _user: CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let customer = state.store.read(|conn| customers::get(conn, id))?;
    Ok(HttpResponse::Ok().json(customer))
}
