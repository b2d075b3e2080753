use super::{commit_with_files, load_detail, store_files, FILES_PART, FORM_PART};
use crate::auth::CurrentUser;
use crate::db::attachments;
use crate::db::entries::{self, EntryFields};
use crate::error::AppResult;
use crate::services::upload::read_multipart;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::requests::EntryForm;
use log::info;

pub(crate) async fn process(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let mut form = read_multipart(payload, state.config.max_upload_bytes).await?;
    let entry_form: EntryForm = form.json(FORM_PART)?;
    let fields = EntryFields::from_form(entry_form, None)?;

    let files = form.take_files(FILES_PART);
    let stored = store_files(&state, &files)?;
    let entry = commit_with_files(&state, &stored, || {
        state.store.write(|tx| {
            let entry = entries::update(tx, id, &fields)?;
            for name in &stored {
                attachments::insert(tx, entry.id, name)?;
            }
            Ok(entry)
        })
    })?;

    info!("Entry {} ({}) updated by {}", entry.id, entry.order_number, user.username);
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(load_detail(&state, entry.id)?))
}
