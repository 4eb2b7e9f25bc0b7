use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, TransactionTrait};
use tracing::{info, instrument};

use models::course;
use crate::domain::{CourseCreate, Validate};
use crate::{errors::ServiceError, pagination::Pagination, tx};

/// Create a course; a duplicate code is a conflict.
#[instrument(skip(db, input), fields(code = %input.code))]
pub async fn create_course(db: &DatabaseConnection, input: CourseCreate) -> Result<course::Model, ServiceError> {
    input.validate()?;
    let am: course::ActiveModel = input.into();

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let res = am.insert(&txn).await;
    let created = tx::finish(txn, res, "Course already exists").await?;
    info!(id = created.id, "created course");
    Ok(created)
}

/// Courses ordered by id, windowed by `page`.
pub async fn list_courses(db: &DatabaseConnection, page: Pagination) -> Result<Vec<course::Model>, ServiceError> {
    course::Entity::find()
        .order_by_asc(course::Column::Id)
        .limit(page.limit)
        .offset(page.offset)
        .all(db)
        .await
        .map_err(ServiceError::db)
}
