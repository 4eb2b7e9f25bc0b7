use sea_orm::DatabaseConnection;

/// Shared handler state. Cloning only clones the pool handle; every request
/// checks out its own connection.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}
