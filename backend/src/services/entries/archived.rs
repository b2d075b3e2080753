use super::list::parse_status;
use crate::auth::CurrentUser;
use crate::db::entries::{self, EntryQuery};
use crate::db::non_empty;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::entry::{Entry, EntryKind};
use common::model::page::Page;
use common::responses::ArchivedEntries;
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArchivedQuery {
    customer: Option<String>,
    status: Option<String>,
    kind: Option<String>,
    orders_page: Option<u32>,
    quotes_page: Option<u32>,
}

pub(crate) async fn process(
    _user: CurrentUser,
    state: web::Data<AppState>,
    query: web::Query<ArchivedQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let kind_filter: Option<EntryKind> = non_empty(query.kind)
        .map(|label| {
            label
                .parse()
                .map_err(|e: common::model::UnknownLabel| AppError::Validation(e.to_string()))
        })
        .transpose()?;
    let base = EntryQuery {
        archived: Some(true),
        status: parse_status(query.status)?,
        customer: non_empty(query.customer),
        ..EntryQuery::default()
    };
    let orders_page = query.orders_page.unwrap_or(1).max(1);
    let quotes_page = query.quotes_page.unwrap_or(1).max(1);

    let result = state.store.read(|conn| {
        let page_of = |conn: &Connection, kind: EntryKind, page: u32| -> AppResult<Page<Entry>> {
            if kind_filter.is_some_and(|wanted| wanted != kind) {
                return Ok(Page::new(Vec::new(), page, 0));
            }
            let query = EntryQuery {
                kind: Some(kind),
                ..base.clone()
            };
            entries::page(conn, &query, page)
        };
        Ok(ArchivedEntries {
            orders: page_of(conn, EntryKind::Order, orders_page)?,
            quotes: page_of(conn, EntryKind::Quote, quotes_page)?,
        })
    })?;
    Ok(HttpResponse::Ok().json(result))
}
