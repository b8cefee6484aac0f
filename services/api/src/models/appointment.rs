//! Appointment model and status workflow

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{require, validate_email, validate_phone};

/// Lifecycle status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled appointments accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    /// Whether the workflow allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid status '{}'", s))
    }
}

/// How status updates are checked against the workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Only transitions allowed by the workflow are accepted
    #[default]
    Enforced,
    /// Staff may overwrite any status with any other
    Unrestricted,
}

impl StatusPolicy {
    /// Whether an update from `from` to `to` is accepted
    ///
    /// Re-applying the current status is always accepted as a no-op.
    pub fn permits(&self, from: AppointmentStatus, to: AppointmentStatus) -> bool {
        if from == to {
            return true;
        }
        match self {
            StatusPolicy::Enforced => from.can_transition_to(to),
            StatusPolicy::Unrestricted => true,
        }
    }
}

/// Stored appointment joined with its service title
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<String>,
    pub service_id: Option<i64>,
    pub service_title: Option<String>,
    pub message: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Public booking form payload
///
/// Carries no status field: bookings always start as pending.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Validated booking ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<String>,
    pub service_id: Option<i64>,
    pub message: Option<String>,
}

impl CreateAppointmentRequest {
    /// Check the fields in form order and report the first problem
    pub fn validate(self) -> Result<NewAppointment, String> {
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)?;
        validate_email("email", &self.email)?;
        validate_phone("phone", &self.phone)?;

        let preferred_date = match non_blank(self.preferred_date) {
            Some(date) => Some(
                NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|_| "preferredDate must be a date in YYYY-MM-DD format".to_string())?,
            ),
            None => None,
        };

        Ok(NewAppointment {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            preferred_date,
            preferred_time: non_blank(self.preferred_time),
            service_id: self.service_id,
            message: non_blank(self.message),
        })
    }
}

/// Status update payload
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Appointment counts per status for the dashboard
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentStats {
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub total: i64,
}

impl AppointmentStats {
    pub fn add(&mut self, status: AppointmentStatus, count: i64) {
        match status {
            AppointmentStatus::Pending => self.pending += count,
            AppointmentStatus::Confirmed => self.confirmed += count,
            AppointmentStatus::Completed => self.completed += count,
            AppointmentStatus::Cancelled => self.cancelled += count,
        }
        self.total += count;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Booking forms send the service as a number, a numeric string or ""
fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawId::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("serviceId must be a number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    fn booking() -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 010 2030".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_transition_table() {
        let allowed = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, Completed),
            (Confirmed, Cancelled),
        ];
        for from in AppointmentStatus::ALL {
            for to in AppointmentStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for status in [Completed, Cancelled] {
            assert!(status.is_terminal());
            assert!(AppointmentStatus::ALL.iter().all(|to| !status.can_transition_to(*to)));
        }
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn test_policies() {
        assert!(StatusPolicy::Enforced.permits(Cancelled, Cancelled));
        assert!(!StatusPolicy::Enforced.permits(Completed, Pending));
        assert!(!StatusPolicy::Enforced.permits(Pending, Completed));
        assert!(StatusPolicy::Unrestricted.permits(Completed, Pending));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("confirmed".parse::<AppointmentStatus>().unwrap(), Confirmed);
        assert!("Confirmed".parse::<AppointmentStatus>().is_err());
        assert!("archived".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_validation_reports_first_missing_field() {
        let mut request = booking();
        request.first_name = " ".to_string();
        request.email = String::new();
        assert_eq!(request.validate().unwrap_err(), "firstName is required");

        let mut request = booking();
        request.phone = "abc".to_string();
        assert_eq!(
            request.validate().unwrap_err(),
            "phone is not a valid phone number"
        );
    }

    #[test]
    fn test_validation_normalizes_optional_fields() {
        let mut request = booking();
        request.preferred_date = Some("2026-03-14".to_string());
        request.preferred_time = Some("  ".to_string());
        request.message = Some(" Sensitive tooth ".to_string());

        let appointment = request.validate().unwrap();
        assert_eq!(
            appointment.preferred_date,
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
        assert_eq!(appointment.preferred_time, None);
        assert_eq!(appointment.message.as_deref(), Some("Sensitive tooth"));

        let mut request = booking();
        request.preferred_date = Some("14/03/2026".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_service_id_accepts_numbers_and_strings() {
        let parse = |body: &str| {
            serde_json::from_str::<CreateAppointmentRequest>(body)
                .unwrap()
                .service_id
        };
        assert_eq!(parse(r#"{"serviceId": 4}"#), Some(4));
        assert_eq!(parse(r#"{"serviceId": "4"}"#), Some(4));
        assert_eq!(parse(r#"{"serviceId": ""}"#), None);
        assert_eq!(parse(r#"{"serviceId": null}"#), None);
        assert_eq!(parse(r#"{}"#), None);
        assert!(serde_json::from_str::<CreateAppointmentRequest>(r#"{"serviceId": "x"}"#).is_err());
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = AppointmentStats::default();
        stats.add(Pending, 3);
        stats.add(Cancelled, 1);
        assert_eq!(stats.pending, 3);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.total, 4);
    }
}
