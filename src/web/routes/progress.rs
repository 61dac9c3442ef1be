use axum::{
    Json, Router, extract::State, http::StatusCode, middleware, response::IntoResponse,
    routing::get,
};

use crate::web::{
    AppState, RequestContext, WebResult, dto::progress::CourseProgressResponse,
    error::ErrorResponse, middlewares,
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(progress_list_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/progress/",
    description = "List current student's course progress, most recently accessed first",
    responses(
        (status = 200, description = "Progress list", body = Vec<CourseProgressResponse>),
        (status = 401, description = "You're not authorized to do this", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "progress",
    security(
        ("cookie" = [])
    )
)]
pub async fn progress_list_handler(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;

    let res: Vec<CourseProgressResponse> = state
        .tracker()
        .list_course_progress(user.user_id())
        .await?
        .into_iter()
        .map(CourseProgressResponse::from)
        .collect();

    Ok((StatusCode::OK, Json(res)))
}
