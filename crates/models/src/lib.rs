//! sea-orm entities for users, courses and projects, their field validators,
//! and database connection helpers.

pub mod errors;
pub mod db;
pub mod validation;
pub mod user;
pub mod course;
pub mod project;

#[cfg(test)]
mod tests;
