//! Infrastructure layer - External systems integration
//!
//! This module handles database connections, the migration runner,
//! and the repository implementations built on top of them.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{UserData, UserRepository, UserStore};
