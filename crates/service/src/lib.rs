//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Runs every write in its own transaction and reports integrity
//!   violations as conflicts.

pub mod errors;
pub mod domain;
pub mod pagination;
pub mod user_service;
pub mod course_service;
pub mod project_service;
mod tx;
#[cfg(test)]
pub mod test_support;
