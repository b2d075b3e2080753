//! Stored attachment files.
//!
//! - `GET /api/attachments/{id}`: the file, served inline.
//! - `DELETE /api/attachments/{id}`: removes the attachment row and its file.

use crate::auth::CurrentUser;
use crate::db::attachments;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::web::{delete, get, scope};
use actix_web::{web, HttpResponse, Scope};
use common::responses::ActionResponse;
use log::info;
use std::io::ErrorKind;

const API_PATH: &str = "/api/attachments";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{id}", get().to(open))
        .route("/{id}", delete().to(remove))
}

async fn open(
    _user: CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<NamedFile> {
    let id = id.into_inner();
    let attachment = state.store.read(|conn| attachments::get(conn, id))?;
    let file = NamedFile::open(state.files.path(&attachment.filename)).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            AppError::NotFound(format!("The file of attachment {} is missing", id))
        } else {
            AppError::Io(e)
        }
    })?;
    Ok(file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Inline,
        parameters: vec![DispositionParam::Filename(attachment.filename)],
    }))
}

async fn remove(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let attachment = state.store.write(|tx| attachments::delete(tx, id))?;
    state.files.delete_all(std::slice::from_ref(&attachment.filename));
    info!(
        "Attachment {} of entry {} deleted by {}",
        attachment.filename, attachment.entry_id, user.username
    );
    state.notifier.notify();
    Ok(HttpResponse::Ok().json(ActionResponse::ok("Attachment deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entries::{self, CustomerChoice, EntryFields};
    use crate::test_support::{login, test_state};
    use actix_web::http::header::CONTENT_DISPOSITION;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::Utc;
    use common::model::entry::{EntryKind, EntryStatus};

    #[actix_web::test]
    async fn serves_then_deletes_an_attachment() {
        let (state, _dir) = test_state();
        let cookie = login(&state, "ana", false);
        let name = state.files.save("nota.txt", b"conteudo").unwrap();
        let attachment = state
            .store
            .write(|tx| {
                let fields = EntryFields {
                    kind: EntryKind::Order,
                    order_number: 3,
                    status: EntryStatus::NotStarted,
                    job_site: None,
                    description: "Porta".to_string(),
                    notes: None,
                    customer: CustomerChoice::Temporary("Ana".to_string()),
                };
                let entry = entries::insert(tx, &fields, Utc::now().naive_utc())?;
                attachments::insert(tx, entry.id, &name)
            })
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/attachments/{}", attachment.id))
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp.headers().get(CONTENT_DISPOSITION).unwrap().to_str().unwrap();
        assert!(disposition.starts_with("inline"));
        assert_eq!(&test::read_body(resp).await[..], b"conteudo");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/attachments/{}", attachment.id))
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!state.files.path(&name).exists());

        let req = test::TestRequest::get()
            .uri(&format!("/api/attachments/{}", attachment.id))
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
