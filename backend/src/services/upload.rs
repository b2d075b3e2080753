//! Buffers a `multipart/form-data` request.
//!
//! Forms in this application send at most a handful of small files, so every
//! part is read into memory, bounded by the configured upload limit.

use crate::error::{AppError, AppResult};
use actix_multipart::Multipart;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, Vec<u8>>,
    files: HashMap<String, Vec<UploadedFile>>,
}

impl MultipartForm {
    /// Deserializes the JSON carried by a text part.
    pub fn json<T: DeserializeOwned>(&self, name: &str) -> AppResult<T> {
        let bytes = self
            .fields
            .get(name)
            .ok_or_else(|| AppError::Validation(format!("Missing '{}' part", name)))?;
        serde_json::from_slice(bytes)
            .map_err(|e| AppError::Validation(format!("Invalid '{}' part: {}", name, e)))
    }

    /// Every file sent under `name`, in upload order.
    pub fn take_files(&mut self, name: &str) -> Vec<UploadedFile> {
        self.files.remove(name).unwrap_or_default()
    }

    /// The single file expected under `name`.
    pub fn take_file(&mut self, name: &str) -> AppResult<UploadedFile> {
        self.take_files(name)
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Validation("No file selected.".to_string()))
    }
}

pub async fn read_multipart(mut payload: Multipart, max_bytes: usize) -> AppResult<MultipartForm> {
    let mut form = MultipartForm::default();
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::Validation(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
            .unwrap_or_default();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()));

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::Validation(e.to_string()))?;
            total += chunk.len();
            if total > max_bytes {
                return Err(AppError::Validation(format!(
                    "The upload exceeds the limit of {} MB",
                    max_bytes / (1024 * 1024)
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        match filename {
            // Browsers send an empty file part when nothing was picked.
            Some(filename) if filename.is_empty() && bytes.is_empty() => {}
            Some(filename) => form
                .files
                .entry(name)
                .or_default()
                .push(UploadedFile { filename, bytes }),
            None => {
                form.fields.insert(name, bytes);
            }
        }
    }
    Ok(form)
}
