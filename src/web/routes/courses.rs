use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::web::{
    AppState, RequestContext, WebResult, dto::progress::CourseProgressResponse,
    error::ErrorResponse, middlewares,
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/{id}/progress", get(courses_progress_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/progress",
    description = "Get current student's aggregated progress in a course",
    params(
        ("course_id" = Uuid, Path, description = "ID of the course")
    ),
    responses(
        (status = 200, description = "Course progress found", body = CourseProgressResponse),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 404, description = "No progress recorded for this course", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "courses",
    security(
        ("cookie" = [])
    )
)]
pub async fn courses_progress_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    let progress = state.tracker().course_progress(user.user_id(), id).await?;

    Ok((StatusCode::OK, Json(CourseProgressResponse::from(progress))))
}
