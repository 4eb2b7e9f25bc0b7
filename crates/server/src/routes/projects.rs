use axum::{extract::State, http::StatusCode, Json};
use models::project;
use service::domain::{ProjectCreate, ProjectCreateForUser, ProjectUpdate, ProjectWithOwner};
use service::errors::ServiceError;
use service::project_service;
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/api/projects", tag = "projects",
    request_body = crate::openapi::ProjectCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProjectReadDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorBody),
        (status = 409, description = "Project creation failed", body = crate::openapi::ErrorBody),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(input): ValidatedJson<ProjectCreate>,
) -> Result<(StatusCode, Json<project::Model>), JsonApiError> {
    let created = project_service::create_project(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/projects", tag = "projects",
    responses((status = 200, description = "All projects ordered by id", body = [crate::openapi::ProjectReadDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<project::Model>>, JsonApiError> {
    Ok(Json(project_service::list_projects(&state.db).await?))
}

#[utoipa::path(
    get, path = "/api/projects/{id}", tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project with its owner", body = crate::openapi::ProjectReadWithOwnerDoc),
        (status = 404, description = "Project not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ProjectWithOwner>, JsonApiError> {
    project_service::get_project_with_owner(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("Project").into())
}

#[utoipa::path(
    patch, path = "/api/projects/{id}", tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    request_body = crate::openapi::ProjectUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProjectReadDoc),
        (status = 404, description = "Project not found", body = crate::openapi::ErrorBody),
        (status = 409, description = "Project update failed (unique constraint)", body = crate::openapi::ErrorBody),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(input): ValidatedJson<ProjectUpdate>,
) -> Result<Json<project::Model>, JsonApiError> {
    let updated = project_service::update_project(&state.db, id, input).await?;
    info!(id, "patched project");
    Ok(Json(updated))
}

#[utoipa::path(
    put, path = "/api/projects/{id}", tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    request_body = crate::openapi::ProjectCreateDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::ProjectReadDoc),
        (status = 404, description = "Project not found", body = crate::openapi::ErrorBody),
        (status = 409, description = "Project already exists", body = crate::openapi::ErrorBody),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn replace(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(input): ValidatedJson<ProjectCreate>,
) -> Result<Json<project::Model>, JsonApiError> {
    let replaced = project_service::replace_project(&state.db, id, input).await?;
    info!(id, "replaced project");
    Ok(Json(replaced))
}

#[utoipa::path(
    get, path = "/api/users/{id}/projects", tag = "projects",
    params(("id" = i32, Path, description = "Owner user id")),
    responses((status = 200, description = "Projects owned by the user", body = [crate::openapi::ProjectReadDoc]))
)]
pub async fn list_for_user(
    State(state): State<ServerState>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<Vec<project::Model>>, JsonApiError> {
    Ok(Json(project_service::list_projects_by_owner(&state.db, user_id).await?))
}

#[utoipa::path(
    post, path = "/api/users/{id}/projects", tag = "projects",
    params(("id" = i32, Path, description = "Owner user id")),
    request_body = crate::openapi::ProjectCreateForUserDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProjectReadDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorBody),
        (status = 409, description = "Project creation failed", body = crate::openapi::ErrorBody),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create_for_user(
    State(state): State<ServerState>,
    ApiPath(user_id): ApiPath<i32>,
    ValidatedJson(input): ValidatedJson<ProjectCreateForUser>,
) -> Result<(StatusCode, Json<project::Model>), JsonApiError> {
    let created = project_service::create_project(&state.db, input.with_owner(user_id)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
