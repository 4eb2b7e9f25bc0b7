#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

use crate::domain::UserCreate;

/// Fresh in-memory SQLite database with migrations applied; each test gets
/// its own isolated store.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn sample_user(n: u32) -> UserCreate {
    UserCreate {
        name: format!("User {n}"),
        email: format!("user{n}@example.com"),
        age: 20 + (n % 50) as i32,
        student_id: format!("S{:07}", n),
    }
}
