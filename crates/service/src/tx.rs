//! Transaction finishing shared by every mutating operation.

use sea_orm::{DatabaseTransaction, DbErr};
use tracing::warn;

use crate::errors::ServiceError;

/// Commit on success, roll back on failure. Integrity violations raised by
/// the write (or by the commit) are reported as `Conflict(conflict_msg)`.
pub(crate) async fn finish<T>(
    txn: DatabaseTransaction,
    res: Result<T, DbErr>,
    conflict_msg: &str,
) -> Result<T, ServiceError> {
    match res {
        Ok(v) => {
            txn.commit().await.map_err(|e| ServiceError::from_write(e, conflict_msg))?;
            Ok(v)
        }
        Err(e) => {
            let err = ServiceError::from_write(e, conflict_msg);
            if let ServiceError::Conflict(_) = &err {
                warn!(reason = %conflict_msg, "write rejected by integrity constraint, rolling back");
            }
            txn.rollback().await.map_err(ServiceError::db)?;
            Err(err)
        }
    }
}

/// Abandon a transaction that made no writes and return `err`.
pub(crate) async fn abort<T>(txn: DatabaseTransaction, err: ServiceError) -> Result<T, ServiceError> {
    txn.rollback().await.map_err(ServiceError::db)?;
    Err(err)
}
