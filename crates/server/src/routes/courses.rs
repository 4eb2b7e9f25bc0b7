use axum::{extract::State, http::StatusCode, Json};
use models::course;
use serde::Deserialize;
use service::{course_service, domain::CourseCreate, pagination::Pagination};
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{ApiQuery, ValidatedJson};
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Max courses returned (default 10)
    #[param(minimum = 0)]
    pub limit: Option<i64>,
    /// Courses skipped (default 0)
    #[param(minimum = 0)]
    pub offset: Option<i64>,
}

#[utoipa::path(
    post, path = "/api/courses", tag = "courses",
    request_body = crate::openapi::CourseCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CourseReadDoc),
        (status = 409, description = "Course already exists", body = crate::openapi::ErrorBody),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(input): ValidatedJson<CourseCreate>,
) -> Result<(StatusCode, Json<course::Model>), JsonApiError> {
    let created = course_service::create_course(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/courses", tag = "courses",
    params(ListQuery),
    responses(
        (status = 200, description = "Courses ordered by id", body = [crate::openapi::CourseReadDoc]),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Vec<course::Model>>, JsonApiError> {
    let page = Pagination::from_query(q.limit, q.offset)?;
    let courses = course_service::list_courses(&state.db, page).await?;
    info!(count = courses.len(), limit = page.limit, offset = page.offset, "list courses");
    Ok(Json(courses))
}
