use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::{info, instrument};

use models::{project, user};
use crate::domain::{UserCreate, UserUpdate, Validate};
use crate::{errors::ServiceError, tx};

/// List all users ordered by id.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    user::Entity::find().order_by_asc(user::Column::Id).all(db).await.map_err(ServiceError::db)
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<Option<user::Model>, ServiceError> {
    user::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)
}

/// Create a user; duplicate email or student_id is a conflict.
#[instrument(skip(db, input))]
pub async fn create_user(db: &DatabaseConnection, input: UserCreate) -> Result<user::Model, ServiceError> {
    input.validate()?;
    let mut am = <user::ActiveModel as Default>::default();
    input.write_to(&mut am);

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let res = am.insert(&txn).await;
    let created = tx::finish(txn, res, "User already exists").await?;
    info!(id = created.id, "created user");
    Ok(created)
}

/// Partial update: only the fields present in `input` change.
#[instrument(skip(db, input))]
pub async fn update_user(db: &DatabaseConnection, id: i32, input: UserUpdate) -> Result<user::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let existing = user::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)?;
    let Some(existing) = existing else { return tx::abort(txn, ServiceError::not_found("User")).await };

    let mut am: user::ActiveModel = existing.clone().into();
    input.merge_into(&mut am);
    if !am.is_changed() {
        txn.rollback().await.map_err(ServiceError::db)?;
        return Ok(existing);
    }
    let res = am.update(&txn).await;
    tx::finish(txn, res, "User update failed (unique constraint)").await
}

/// Full replace: every field is overwritten from `input`.
#[instrument(skip(db, input))]
pub async fn replace_user(db: &DatabaseConnection, id: i32, input: UserCreate) -> Result<user::Model, ServiceError> {
    input.validate()?;
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let existing = user::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)?;
    let Some(existing) = existing else { return tx::abort(txn, ServiceError::not_found("User")).await };

    let mut am: user::ActiveModel = existing.into();
    input.write_to(&mut am);
    let res = am.update(&txn).await;
    tx::finish(txn, res, "User already exists").await
}

/// Hard-delete a user together with every project it owns.
/// Returns the number of projects removed.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    let existing = user::Entity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)?;
    if existing.is_none() {
        return tx::abort(txn, ServiceError::not_found("User")).await;
    }

    let res = async {
        let projects = project::Entity::delete_many()
            .filter(project::Column::OwnerId.eq(id))
            .exec(&txn)
            .await?;
        user::Entity::delete_by_id(id).exec(&txn).await?;
        Ok::<_, sea_orm::DbErr>(projects.rows_affected)
    }
    .await;
    let removed = tx::finish(txn, res, "User delete failed").await?;
    info!(id, projects_removed = removed, "deleted user");
    Ok(removed)
}
