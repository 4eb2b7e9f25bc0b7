use axum::{extract::State, http::StatusCode, Json};
use models::user;
use service::domain::{UserCreate, UserUpdate};
use service::user_service;
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/users", tag = "users",
    responses((status = 200, description = "All users ordered by id", body = [crate::openapi::UserReadDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<user::Model>>, JsonApiError> {
    let users = user_service::list_users(&state.db).await?;
    Ok(Json(users))
}

#[utoipa::path(
    get, path = "/api/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UserReadDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<user::Model>, JsonApiError> {
    match user_service::get_user(&state.db, id).await? {
        Some(u) => Ok(Json(u)),
        None => Err(service::errors::ServiceError::not_found("User").into()),
    }
}

#[utoipa::path(
    post, path = "/api/users", tag = "users",
    request_body = crate::openapi::UserCreateDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserReadDoc),
        (status = 409, description = "User already exists", body = crate::openapi::ErrorBody),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(input): ValidatedJson<UserCreate>,
) -> Result<(StatusCode, Json<user::Model>), JsonApiError> {
    let created = user_service::create_user(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch, path = "/api/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    request_body = crate::openapi::UserUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserReadDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorBody),
        (status = 409, description = "User update failed (unique constraint)", body = crate::openapi::ErrorBody),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(input): ValidatedJson<UserUpdate>,
) -> Result<Json<user::Model>, JsonApiError> {
    let updated = user_service::update_user(&state.db, id, input).await?;
    info!(id, "patched user");
    Ok(Json(updated))
}

#[utoipa::path(
    put, path = "/api/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    request_body = crate::openapi::UserCreateDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::UserReadDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorBody),
        (status = 409, description = "User already exists", body = crate::openapi::ErrorBody),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn replace(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(input): ValidatedJson<UserCreate>,
) -> Result<Json<user::Model>, JsonApiError> {
    let replaced = user_service::replace_user(&state.db, id, input).await?;
    info!(id, "replaced user");
    Ok(Json(replaced))
}

#[utoipa::path(
    delete, path = "/api/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "Deleted together with owned projects"),
        (status = 404, description = "User not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    user_service::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
