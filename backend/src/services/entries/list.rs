use crate::auth::CurrentUser;
use crate::db::entries::{self, EntryQuery};
use crate::db::non_empty;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::entry::{EntryKind, EntryStatus};
use common::responses::EntryPanel;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PanelQuery {
    q: Option<String>,
    status: Option<String>,
}

pub(crate) fn parse_status(value: Option<String>) -> AppResult<Option<EntryStatus>> {
    non_empty(value)
        .map(|label| {
            label
                .parse()
                .map_err(|e: common::model::UnknownLabel| AppError::Validation(e.to_string()))
        })
        .transpose()
}

pub(crate) async fn process(
    _user: CurrentUser,
    state: web::Data<AppState>,
    query: web::Query<PanelQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let base = EntryQuery {
        archived: Some(false),
        status: parse_status(query.status)?,
        search: non_empty(query.q),
        ..EntryQuery::default()
    };

    let panel = state.store.read(|conn| {
        let of_kind = |kind| EntryQuery {
            kind: Some(kind),
            ..base.clone()
        };
        Ok(EntryPanel {
            orders: entries::select(conn, &of_kind(EntryKind::Order), "e.order_number")?,
            quotes: entries::select(conn, &of_kind(EntryKind::Quote), "e.order_number")?,
            dashboard: entries::dashboard(conn)?,
        })
    })?;
    Ok(HttpResponse::Ok().json(panel))
}
