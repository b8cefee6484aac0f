//! Blog posts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{require, slugify, validate_slug};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image: Option<String>,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

impl BlogPayload {
    pub fn validate(mut self) -> Result<Self, String> {
        require("title", &self.title)?;
        require("content", &self.content)?;
        self.title = self.title.trim().to_string();

        let slug = match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&self.title),
        };
        validate_slug("slug", &slug)?;
        self.slug = Some(slug);

        if self.category.trim().is_empty() {
            self.category = "general".to_string();
        }
        self.tags = super::clean_list(self.tags);
        Ok(self)
    }

    pub fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or_default()
    }
}

/// Query string of the blog listing
#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    pub slug: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub all: bool,
}
