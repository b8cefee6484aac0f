//! Authentication service models

pub mod user;

pub use user::{AdminUser, LoginCredentials, NewAdminUser};
