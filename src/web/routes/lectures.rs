use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{patch, post};
use axum::{Router, extract::State, middleware, response::IntoResponse};
use uuid::Uuid;

use crate::web::dto::progress::LectureProgressResponse;
use crate::web::error::ErrorResponse;
use crate::web::{AppState, RequestContext, WebResult, middlewares};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/{id}/mark-complete", post(lectures_mark_complete_handler))
        .route("/{id}/mark-incomplete", patch(lectures_mark_incomplete_handler))
        .route(
            "/{id}/progress",
            post(lectures_start_handler).get(lectures_progress_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/v1/lectures/{lecture_id}/mark-complete",
    description = "Mark lecture as completed for the current student",
    params(
        ("lecture_id" = Uuid, Path, description = "ID of the lecture to mark")
    ),
    responses(
        (status = 201, description = "Lecture marked complete", body = LectureProgressResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 403, description = "You're not enrolled in this course", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "lectures"
)]
pub async fn lectures_mark_complete_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let progress = state.tracker().mark_complete(user.user_id(), id).await?;

    Ok((StatusCode::CREATED, Json(LectureProgressResponse::from(progress))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/lectures/{lecture_id}/mark-incomplete",
    description = "Revert a completed lecture back to incomplete",
    params(
        ("lecture_id" = Uuid, Path, description = "ID of the lecture to unmark")
    ),
    responses(
        (status = 200, description = "Lecture marked incomplete", body = LectureProgressResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 403, description = "You're not enrolled in this course", body = ErrorResponse),
        (status = 404, description = "Lecture or progress not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "lectures"
)]
pub async fn lectures_mark_incomplete_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let progress = state.tracker().mark_incomplete(user.user_id(), id).await?;

    Ok((StatusCode::OK, Json(LectureProgressResponse::from(progress))))
}

#[utoipa::path(
    post,
    path = "/api/v1/lectures/{lecture_id}/progress",
    description = "Start tracking a lecture. Returns the existing record if there is one",
    params(
        ("lecture_id" = Uuid, Path, description = "ID of the lecture to start")
    ),
    responses(
        (status = 201, description = "Progress record ready", body = LectureProgressResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 403, description = "You're not enrolled in this course", body = ErrorResponse),
        (status = 404, description = "Lecture not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "lectures"
)]
pub async fn lectures_start_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let progress = state.tracker().start_lecture(user.user_id(), id).await?;

    Ok((StatusCode::CREATED, Json(LectureProgressResponse::from(progress))))
}

#[utoipa::path(
    get,
    path = "/api/v1/lectures/{lecture_id}/progress",
    description = "Fetch current student's progress on a lecture",
    params(
        ("lecture_id" = Uuid, Path, description = "ID of the lecture")
    ),
    responses(
        (status = 200, description = "Progress found", body = LectureProgressResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 404, description = "Progress not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(
        ("cookie" = [])
    ),
    tag = "lectures"
)]
pub async fn lectures_progress_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let progress = state.tracker().lecture_progress(user.user_id(), id).await?;

    Ok((StatusCode::OK, Json(LectureProgressResponse::from(progress))))
}
