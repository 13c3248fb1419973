use axum::extract::{Path, State};
use axum::Json;

use crate::app::AppState;
use crate::errors::AppResult;
use crate::jwt::BearerToken;
use crate::models::lesson::{VideoUrlRequest, VideoUrlResponse};

/// Body-based variant kept for clients that post `{ "lessonId": ... }`.
#[utoipa::path(
    post,
    path = "/functions/get-video-url",
    tag = "Lessons",
    request_body = VideoUrlRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Signed video URL", body = VideoUrlResponse),
        (status = 400, description = "lessonId missing"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not enrolled, not an instructor of the course, not an admin"),
        (status = 404, description = "Lesson not found"),
        (status = 500, description = "Storage or data store failure")
    )
)]
pub async fn get_video_url(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    payload: Option<Json<VideoUrlRequest>>,
) -> AppResult<Json<VideoUrlResponse>> {
    let lesson_id = payload.and_then(|Json(body)| body.lesson_id);

    let access = state
        .resolver
        .resolve_lesson_video_access(token.as_deref(), lesson_id.as_deref())
        .await?;

    Ok(Json(access.into()))
}

#[utoipa::path(
    get,
    path = "/lessons/{id}/video-url",
    tag = "Lessons",
    params(("id" = String, Path, description = "Lesson id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Signed video URL", body = VideoUrlResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Lesson not found"),
        (status = 500, description = "Storage or data store failure")
    )
)]
pub async fn lesson_video_url(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<String>,
) -> AppResult<Json<VideoUrlResponse>> {
    let access = state
        .resolver
        .resolve_lesson_video_access(token.as_deref(), Some(&id))
        .await?;

    Ok(Json(access.into()))
}
