//! Patient testimonials

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::require;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i64,
    pub patient_name: String,
    pub content: String,
    pub rating: i16,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPayload {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_rating")]
    pub rating: i16,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

impl TestimonialPayload {
    pub fn validate(mut self) -> Result<Self, String> {
        require("patientName", &self.patient_name)?;
        require("content", &self.content)?;
        if !(1..=5).contains(&self.rating) {
            return Err("rating must be between 1 and 5".to_string());
        }
        self.patient_name = self.patient_name.trim().to_string();
        Ok(self)
    }
}

fn default_rating() -> i16 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let parse = |body: &str| serde_json::from_str::<TestimonialPayload>(body).unwrap();

        let payload = parse(r#"{"patientName": "Sam", "content": "Painless!"}"#);
        assert_eq!(payload.validate().unwrap().rating, 5);

        let payload = parse(r#"{"patientName": "Sam", "content": "Meh", "rating": 0}"#);
        assert!(payload.validate().is_err());

        let payload = parse(r#"{"patientName": "Sam", "content": "Wow", "rating": 6}"#);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_fields_required() {
        let payload: TestimonialPayload = serde_json::from_str(r#"{"content": "Great"}"#).unwrap();
        assert_eq!(payload.validate().unwrap_err(), "patientName is required");
    }
}
