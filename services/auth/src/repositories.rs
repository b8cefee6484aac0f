//! Repositories for database operations

pub mod user;

#[cfg(test)]
pub mod memory;

pub use user::{AdminUserStore, UserRepository};
