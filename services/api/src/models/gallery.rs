//! Gallery images

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::require;

/// Category used when a form leaves it blank
pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub image_path: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Text fields of a gallery image, from a multipart form or a JSON body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

impl GalleryFields {
    pub fn validate(mut self) -> Result<Self, String> {
        require("title", &self.title)?;
        self.title = self.title.trim().to_string();

        let category = self.category.trim();
        self.category = if category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category.to_lowercase()
        };

        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(self)
    }
}

/// Query string of the gallery listing
#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_defaults_and_normalizes() {
        let fields = GalleryFields {
            title: "Smile makeover".to_string(),
            ..Default::default()
        };
        assert_eq!(fields.validate().unwrap().category, DEFAULT_CATEGORY);

        let fields = GalleryFields {
            title: "Before".to_string(),
            category: " Whitening ".to_string(),
            description: Some("  ".to_string()),
            sort_order: 2,
        };
        let fields = fields.validate().unwrap();
        assert_eq!(fields.category, "whitening");
        assert_eq!(fields.description, None);
    }

    #[test]
    fn test_title_required() {
        assert_eq!(
            GalleryFields::default().validate().unwrap_err(),
            "title is required"
        );
    }
}
