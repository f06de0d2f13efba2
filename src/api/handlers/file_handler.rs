//! File storage handlers. All routes are admin-gated.
//!
//! Uploads are written straight to the bucket; reads hand out presigned
//! URLs so file bytes never stream back through the API.

use axum::{
    extract::{Multipart, Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{Datelike, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::AdminUser;
use crate::api::AppState;
use crate::config::STORAGE_UPLOAD_PREFIX;
use crate::errors::{AppError, AppResult};
use crate::types::Created;

/// Upload result
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    /// Object key inside the bucket
    pub key: String,
    /// Presigned download URL
    pub url: String,
    pub content_type: String,
    /// Object size in bytes
    pub size: u64,
}

/// Presigned download handle
#[derive(Debug, Serialize, ToSchema)]
pub struct FileUrlResponse {
    pub url: String,
    /// Seconds until the URL stops working
    pub expires: u64,
}

/// Deletion result
#[derive(Debug, Serialize, ToSchema)]
pub struct FileDeletedResponse {
    pub deleted: bool,
}

/// Admin-only file routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(upload_file))
        .route("/files/*key", get(fetch_file).delete(delete_file))
}

fn extension_for(content_type: &str) -> AppResult<&'static str> {
    match content_type {
        "image/jpeg" => Ok("jpg"),
        "image/png" => Ok("png"),
        "image/webp" => Ok("webp"),
        "application/pdf" => Ok("pdf"),
        _ => Err(AppError::bad_request("Unsupported file type")),
    }
}

/// Upload a file
#[utoipa::path(
    post,
    path = "/files",
    tag = "Files",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "File stored", body = FileUploadResponse),
        (status = 400, description = "Missing file field or unsupported type")
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> AppResult<Created<FileUploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let extension = extension_for(&content_type)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Failed to read upload: {}", e)))?;

        let key = format!(
            "{}/{}/{}.{}",
            STORAGE_UPLOAD_PREFIX,
            Utc::now().year(),
            Uuid::new_v4(),
            extension
        );

        let size = data.len() as u64;
        state.storage.store(&key, data.to_vec()).await?;
        let signed = state.storage.presigned_url(&key).await?;

        return Ok(Created(FileUploadResponse {
            key,
            url: signed.url,
            content_type,
            size,
        }));
    }

    Err(AppError::bad_request("Missing file field"))
}

/// Fetch a presigned download URL
#[utoipa::path(
    get,
    path = "/files/{key}",
    tag = "Files",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Presigned URL", body = FileUrlResponse),
        (status = 404, description = "Object not found")
    )
)]
pub async fn fetch_file(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(key): Path<String>,
) -> AppResult<Json<FileUrlResponse>> {
    if !state.storage.exists(&key).await? {
        return Err(AppError::NotFound);
    }

    let signed = state.storage.presigned_url(&key).await?;

    Ok(Json(FileUrlResponse {
        url: signed.url,
        expires: signed.expires,
    }))
}

/// Delete a file
#[utoipa::path(
    delete,
    path = "/files/{key}",
    tag = "Files",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Object deleted", body = FileDeletedResponse),
        (status = 404, description = "Object not found")
    )
)]
pub async fn delete_file(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(key): Path<String>,
) -> AppResult<Json<FileDeletedResponse>> {
    if !state.storage.exists(&key).await? {
        return Err(AppError::NotFound);
    }

    state.storage.delete(&key).await?;

    Ok(Json(FileDeletedResponse { deleted: true }))
}
