//! API models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod appointment;
pub mod blog;
pub mod doctor;
pub mod gallery;
pub mod service;
pub mod testimonial;

/// Query string shared by listings that hide inactive records
#[derive(Debug, Default, Deserialize)]
pub struct VisibilityQuery {
    /// Include inactive records; honored only with a valid session
    #[serde(default)]
    pub all: bool,
}

/// Response carrying the id of a created record
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Response of an image upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
}

pub(crate) fn default_true() -> bool {
    true
}

/// Trim list entries and drop blank ones
pub(crate) fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
