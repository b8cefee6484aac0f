//! Doctor repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::doctor::{Doctor, DoctorPayload};

const COLUMNS: &str =
    "id, name, title, bio, image, specialties, is_active, sort_order, created_at, updated_at";

#[derive(Clone)]
pub struct DoctorRepository {
    pool: PgPool,
}

impl DoctorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Doctor {
        Doctor {
            id: row.get("id"),
            name: row.get("name"),
            title: row.get("title"),
            bio: row.get("bio"),
            image: row.get("image"),
            specialties: row.get("specialties"),
            is_active: row.get("is_active"),
            sort_order: row.get("sort_order"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    pub async fn list(&self, include_inactive: bool) -> DatabaseResult<Vec<Doctor>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM doctors WHERE is_active OR $1 ORDER BY sort_order, id",
            COLUMNS
        ))
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Doctor>> {
        let row = sqlx::query(&format!("SELECT {} FROM doctors WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn create(&self, payload: &DoctorPayload) -> DatabaseResult<Doctor> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO doctors (name, title, bio, image, specialties, is_active, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&payload.name)
        .bind(&payload.title)
        .bind(&payload.bio)
        .bind(&payload.image)
        .bind(&payload.specialties)
        .bind(payload.is_active)
        .bind(payload.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(Self::map_row(&row))
    }

    pub async fn update(&self, id: i64, payload: &DoctorPayload) -> DatabaseResult<Option<Doctor>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE doctors
            SET name = $2, title = $3, bio = $4, image = $5, specialties = $6,
                is_active = $7, sort_order = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.title)
        .bind(&payload.bio)
        .bind(&payload.image)
        .bind(&payload.specialties)
        .bind(payload.is_active)
        .bind(payload.sort_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
