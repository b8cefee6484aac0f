//! Clinic service offering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{require, slugify, validate_slug};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub features: Vec<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/replace payload for a service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[serde(default)]
    pub title: String,
    /// Derived from the title when omitted
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl ServicePayload {
    pub fn validate(mut self) -> Result<Self, String> {
        require("title", &self.title)?;
        self.title = self.title.trim().to_string();

        let slug = match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&self.title),
        };
        validate_slug("slug", &slug)?;
        self.slug = Some(slug);

        self.features = super::clean_list(self.features);
        Ok(self)
    }

    /// Slug after validation
    pub fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or_default()
    }
}
