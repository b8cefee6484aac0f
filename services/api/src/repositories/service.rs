//! Service repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::service::{Service, ServicePayload};

const COLUMNS: &str = "id, title, slug, description, price, icon, image, features, is_active, sort_order, created_at, updated_at";

#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Service {
        Service {
            id: row.get("id"),
            title: row.get("title"),
            slug: row.get("slug"),
            description: row.get("description"),
            price: row.get("price"),
            icon: row.get("icon"),
            image: row.get("image"),
            features: row.get("features"),
            is_active: row.get("is_active"),
            sort_order: row.get("sort_order"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// List services in display order, optionally including inactive ones
    pub async fn list(&self, include_inactive: bool) -> DatabaseResult<Vec<Service>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM services WHERE is_active OR $1 ORDER BY sort_order, id",
            COLUMNS
        ))
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Service>> {
        let row = sqlx::query(&format!("SELECT {} FROM services WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn create(&self, payload: &ServicePayload) -> DatabaseResult<Service> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO services
                (title, slug, description, price, icon, image, features, is_active, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&payload.title)
        .bind(payload.slug())
        .bind(&payload.description)
        .bind(&payload.price)
        .bind(&payload.icon)
        .bind(&payload.image)
        .bind(&payload.features)
        .bind(payload.is_active)
        .bind(payload.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(Self::map_row(&row))
    }

    pub async fn update(&self, id: i64, payload: &ServicePayload) -> DatabaseResult<Option<Service>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE services
            SET title = $2, slug = $3, description = $4, price = $5, icon = $6, image = $7,
                features = $8, is_active = $9, sort_order = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&payload.title)
        .bind(payload.slug())
        .bind(&payload.description)
        .bind(&payload.price)
        .bind(&payload.icon)
        .bind(&payload.image)
        .bind(&payload.features)
        .bind(payload.is_active)
        .bind(payload.sort_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
