//! Testimonial repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::testimonial::{Testimonial, TestimonialPayload};

const COLUMNS: &str = "id, patient_name, content, rating, image, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Testimonial {
        Testimonial {
            id: row.get("id"),
            patient_name: row.get("patient_name"),
            content: row.get("content"),
            rating: row.get("rating"),
            image: row.get("image"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    pub async fn list(&self, include_inactive: bool) -> DatabaseResult<Vec<Testimonial>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM testimonials WHERE is_active OR $1 ORDER BY created_at DESC, id DESC",
            COLUMNS
        ))
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Testimonial>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM testimonials WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn create(&self, payload: &TestimonialPayload) -> DatabaseResult<Testimonial> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO testimonials (patient_name, content, rating, image, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&payload.patient_name)
        .bind(&payload.content)
        .bind(payload.rating)
        .bind(&payload.image)
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(Self::map_row(&row))
    }

    pub async fn update(
        &self,
        id: i64,
        payload: &TestimonialPayload,
    ) -> DatabaseResult<Option<Testimonial>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE testimonials
            SET patient_name = $2, content = $3, rating = $4, image = $5, is_active = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&payload.patient_name)
        .bind(&payload.content)
        .bind(payload.rating)
        .bind(&payload.image)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
