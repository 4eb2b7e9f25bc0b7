use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{info, instrument};

use models::{project, user};
use crate::domain::{ProjectCreate, ProjectUpdate, ProjectWithOwner, Validate};
use crate::{errors::ServiceError, tx};

/// List all projects ordered by id.
pub async fn list_projects(db: &DatabaseConnection) -> Result<Vec<project::Model>, ServiceError> {
    project::Entity::find().order_by_asc(project::Column::Id).all(db).await.map_err(ServiceError::db)
}

/// Projects owned by `owner_id`. An unknown owner yields an empty list.
pub async fn list_projects_by_owner(db: &DatabaseConnection, owner_id: i32) -> Result<Vec<project::Model>, ServiceError> {
    project::Entity::find()
        .filter(project::Column::OwnerId.eq(owner_id))
        .order_by_asc(project::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

/// Get a project with its owner loaded in the same query.
pub async fn get_project_with_owner(db: &DatabaseConnection, id: i32) -> Result<Option<ProjectWithOwner>, ServiceError> {
    let found = project::Entity::find_by_id(id)
        .find_also_related(user::Entity)
        .one(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(found.map(|(project, owner)| ProjectWithOwner { project, owner }))
}

/// Create a project; the owner must exist.
#[instrument(skip(db, input), fields(owner_id = input.owner_id))]
pub async fn create_project(db: &DatabaseConnection, input: ProjectCreate) -> Result<project::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let owner = user::Entity::find_by_id(input.owner_id).one(&txn).await.map_err(ServiceError::db)?;
    if owner.is_none() {
        return tx::abort(txn, ServiceError::not_found("User")).await;
    }

    let mut am = <project::ActiveModel as Default>::default();
    input.write_to(&mut am);
    let res = am.insert(&txn).await;
    let created = tx::finish(txn, res, "Project creation failed").await?;
    info!(id = created.id, "created project");
    Ok(created)
}

/// Partial update. Moving a project to a missing owner is rejected by the
/// foreign key and reported as a conflict.
#[instrument(skip(db, input))]
pub async fn update_project(db: &DatabaseConnection, id: i32, input: ProjectUpdate) -> Result<project::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let existing = project::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)?;
    let Some(existing) = existing else { return tx::abort(txn, ServiceError::not_found("Project")).await };

    let mut am: project::ActiveModel = existing.clone().into();
    input.merge_into(&mut am);
    if !am.is_changed() {
        txn.rollback().await.map_err(ServiceError::db)?;
        return Ok(existing);
    }
    let res = am.update(&txn).await;
    tx::finish(txn, res, "Project update failed (unique constraint)").await
}

/// Full replace from a create payload; an omitted description is cleared.
#[instrument(skip(db, input))]
pub async fn replace_project(db: &DatabaseConnection, id: i32, input: ProjectCreate) -> Result<project::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let existing = project::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)?;
    let Some(existing) = existing else { return tx::abort(txn, ServiceError::not_found("Project")).await };

    let mut am: project::ActiveModel = existing.into();
    input.write_to(&mut am);
    let res = am.update(&txn).await;
    tx::finish(txn, res, "Project already exists").await
}
