//! Report generation from uploaded documents.
//!
//! - `POST /api/reports/romaneio`: multipart `pdf_file`; returns the order
//!   blocks found in the romaneio PDF.

use crate::auth::CurrentUser;
use crate::error::{AppError, AppResult};
use crate::romaneio;
use crate::services::blocking;
use crate::services::upload::read_multipart;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::web::{post, scope};
use actix_web::{web, HttpResponse, Scope};
use common::model::romaneio::RomaneioRecord;
use common::responses::RomaneioResponse;
use log::info;

const API_PATH: &str = "/api/reports";
const PDF_PART: &str = "pdf_file";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/romaneio", post().to(process))
}

async fn process(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = read_multipart(payload, state.config.max_upload_bytes).await?;
    let file = form.take_file(PDF_PART)?;
    if !file.filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Invalid file format. Please send a .pdf file.".to_string(),
        ));
    }

    let extractor = state.extractor.clone();
    let parser = state.parser.clone();
    let records = blocking(move || {
        romaneio::process(extractor.as_ref(), parser.as_ref(), &file.bytes)
    })
    .await?;
    info!(
        "Romaneio report by {}: {} order block(s) found",
        user.username,
        records.len()
    );
    Ok(HttpResponse::Ok().json(response_for(records)))
}

fn response_for(records: Vec<RomaneioRecord>) -> RomaneioResponse {
    if records.is_empty() {
        RomaneioResponse {
            success: false,
            message: "No valid order data was found. The PDF layout may differ from the expected one."
                .to_string(),
            records,
        }
    } else {
        RomaneioResponse {
            success: true,
            message: format!("{} order(s) processed successfully", records.len()),
            records,
        }
    }
}
