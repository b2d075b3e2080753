use super::{commit_with_files, load_detail, store_files, FILES_PART, FORM_PART};
use crate::auth::CurrentUser;
use crate::db::attachments;
use crate::db::entries::{self, EntryFields};
use crate::error::AppResult;
use crate::services::upload::read_multipart;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::requests::EntryForm;
use log::info;

pub(crate) async fn process(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = read_multipart(payload, state.config.max_upload_bytes).await?;
    let entry_form: EntryForm = form.json(FORM_PART)?;
    let now = Utc::now();
    let fields = EntryFields::from_form(entry_form, Some(now.timestamp()))?;

    let files = form.take_files(FILES_PART);
    let stored = store_files(&state, &files)?;
    let entry = commit_with_files(&state, &stored, || {
        state.store.write(|tx| {
            let entry = entries::insert(tx, &fields, now.naive_utc())?;
            for name in &stored {
                attachments::insert(tx, entry.id, name)?;
            }
            Ok(entry)
        })
    })?;

    info!(
        "{} {} created by {} with {} attachment(s)",
        entry.kind,
        entry.order_number,
        user.username,
        stored.len()
    );
    state.notifier.notify();
    Ok(HttpResponse::Created().json(load_detail(&state, entry.id)?))
}
