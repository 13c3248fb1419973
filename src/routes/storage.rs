use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::storage::{key_fingerprint, StoreError};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SignedObjectQuery {
    /// Token minted together with the signed URL.
    pub token: Option<String>,
}

#[utoipa::path(
    get,
    path = "/storage/object/sign/{object_id}",
    tag = "Storage",
    params(
        ("object_id" = String, Path, description = "Public id of the object (the lesson id)"),
        SignedObjectQuery
    ),
    responses(
        (status = 200, description = "Object bytes, streamed"),
        (status = 401, description = "Token missing or expired"),
        (status = 403, description = "Token invalid or bound to another object"),
        (status = 404, description = "Object not found")
    )
)]
pub async fn download_signed_object(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
    Query(query): Query<SignedObjectQuery>,
) -> AppResult<Response> {
    let token = query
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("signed url token missing"))?;

    let granted = state.storage.verify(&token)?;
    if Uuid::parse_str(&object_id).ok() != Some(granted) {
        tracing::warn!(object_id = %object_id, granted = %granted, "signed url token used for another object");
        return Err(AppError::forbidden("token does not grant this object"));
    }

    // The storage key stays server-side: the object id names a lesson.
    let lesson = state
        .catalog
        .find_lesson(granted)
        .await?
        .ok_or_else(|| AppError::not_found("object not found"))?;

    let file = state.storage.open(&lesson.storage_key).await?;
    let len = file.metadata().await.map_err(StoreError::from)?.len();

    tracing::debug!(object = %key_fingerprint(&lesson.storage_key), bytes = len, "streaming signed object");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type(&lesson.storage_key))
        .header(header::CONTENT_LENGTH, len)
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|err| AppError::internal(format!("failed to build response: {err}")))
}

fn content_type(key: &str) -> &'static str {
    match key.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("m3u8") => "application/vnd.apple.mpegurl",
        Some("ts") => "video/mp2t",
        _ => "application/octet-stream",
    }
}
