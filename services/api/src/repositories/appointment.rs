//! Appointment repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::appointment::{
    Appointment, AppointmentStats, AppointmentStatus, NewAppointment,
};

/// Storage of appointment bookings
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Insert a booking with status `pending`; returns the new id
    async fn create(&self, appointment: &NewAppointment) -> DatabaseResult<i64>;

    /// All bookings, newest first, joined with their service title
    async fn list(&self) -> DatabaseResult<Vec<Appointment>>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Appointment>>;

    /// Current status of a booking, `None` when the id is unknown
    async fn status(&self, id: i64) -> DatabaseResult<Option<AppointmentStatus>>;

    /// Move from `from` to `to` in one step; false when the id is unknown or
    /// the stored status is no longer `from`
    async fn set_status(
        &self,
        id: i64,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> DatabaseResult<bool>;

    async fn stats(&self) -> DatabaseResult<AppointmentStats>;
}

/// PostgreSQL-backed appointment repository
#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

const SELECT_APPOINTMENTS: &str = r#"
    SELECT a.id, a.first_name, a.last_name, a.email, a.phone, a.preferred_date,
           a.preferred_time, a.service_id, s.title AS service_title, a.message,
           a.status, a.created_at
    FROM appointments a
    LEFT JOIN services s ON s.id = a.service_id
"#;

impl AppointmentRepository {
    /// Create a new appointment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> DatabaseResult<Appointment> {
        Ok(Appointment {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            phone: row.get("phone"),
            preferred_date: row.get("preferred_date"),
            preferred_time: row.get("preferred_time"),
            service_id: row.get("service_id"),
            service_title: row.get("service_title"),
            message: row.get("message"),
            status: parse_status(row.get("status"))?,
            created_at: row.get("created_at"),
        })
    }
}

fn parse_status(raw: String) -> DatabaseResult<AppointmentStatus> {
    raw.parse().map_err(DatabaseError::Decode)
}

#[async_trait]
impl AppointmentStore for AppointmentRepository {
    async fn create(&self, appointment: &NewAppointment) -> DatabaseResult<i64> {
        // Unknown service ids are stored as NULL rather than failing the FK.
        sqlx::query_scalar(
            r#"
            INSERT INTO appointments
                (first_name, last_name, email, phone, preferred_date, preferred_time,
                 service_id, message, status)
            VALUES ($1, $2, $3, $4, $5, $6, (SELECT id FROM services WHERE id = $7), $8, 'pending')
            RETURNING id
            "#,
        )
        .bind(&appointment.first_name)
        .bind(&appointment.last_name)
        .bind(&appointment.email)
        .bind(&appointment.phone)
        .bind(appointment.preferred_date)
        .bind(&appointment.preferred_time)
        .bind(appointment.service_id)
        .bind(&appointment.message)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn list(&self) -> DatabaseResult<Vec<Appointment>> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY a.created_at DESC, a.id DESC",
            SELECT_APPOINTMENTS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Appointment>> {
        let row = sqlx::query(&format!("{} WHERE a.id = $1", SELECT_APPOINTMENTS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn status(&self, id: i64) -> DatabaseResult<Option<AppointmentStatus>> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM appointments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(DatabaseError::Query)?;

        status.map(parse_status).transpose()
    }

    async fn set_status(
        &self,
        id: i64,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> DatabaseResult<bool> {
        let result =
            sqlx::query("UPDATE appointments SET status = $2 WHERE id = $1 AND status = $3")
                .bind(id)
                .bind(to.as_str())
                .bind(from.as_str())
                .execute(&self.pool)
                .await
                .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self) -> DatabaseResult<AppointmentStats> {
        let rows = sqlx::query("SELECT status, COUNT(*) AS total FROM appointments GROUP BY status")
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        let mut stats = AppointmentStats::default();
        for row in rows {
            stats.add(parse_status(row.get("status"))?, row.get("total"));
        }
        Ok(stats)
    }
}
