//! Doctor profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::require;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub image: Option<String>,
    pub specialties: Vec<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

impl DoctorPayload {
    pub fn validate(mut self) -> Result<Self, String> {
        require("name", &self.name)?;
        self.name = self.name.trim().to_string();
        self.specialties = super::clean_list(self.specialties);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctor_payload() {
        let payload: DoctorPayload = serde_json::from_str(
            r#"{"name": " Dr. Amara Lee ", "specialties": ["Orthodontics", "", "Implants"], "isActive": false}"#,
        )
        .unwrap();
        let payload = payload.validate().unwrap();
        assert_eq!(payload.name, "Dr. Amara Lee");
        assert_eq!(payload.specialties, vec!["Orthodontics", "Implants"]);
        assert!(!payload.is_active);

        let missing: DoctorPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.validate().unwrap_err(), "name is required");
    }
}
