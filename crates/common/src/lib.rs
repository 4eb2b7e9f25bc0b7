//! Shared building blocks for the workspace: wire types reused by several
//! crates and tracing initialisation.

pub mod types;
pub mod utils;
