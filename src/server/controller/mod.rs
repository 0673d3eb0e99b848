//! HTTP request handlers.
//!
//! Each submodule covers one resource. Handlers resolve the caller through
//! [`AuthGuard`](crate::server::middleware::auth::AuthGuard), convert DTOs into
//! service parameters and map the service result back into a DTO response.

pub mod auth;
pub mod booking;
pub mod car;
pub mod contract;
pub mod country;
pub mod location;
pub mod notification;
pub mod supplier;
pub mod user;

use axum::extract::Multipart;

use crate::server::error::AppError;

/// Multipart field carrying an uploaded file.
pub static UPLOAD_FIELD: &str = "file";

/// Reads the `file` field of a multipart upload.
///
/// # Returns
/// - `Ok((file_name, bytes))` - Original file name and content
/// - `Err(AppError::BadRequest)` - No `file` field, or an empty one
pub async fn read_upload(mut multipart: Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        return Ok((file_name, bytes.to_vec()));
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{}'",
        UPLOAD_FIELD
    )))
}
