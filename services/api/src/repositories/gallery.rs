//! Gallery repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::gallery::{GalleryFields, GalleryImage};

const COLUMNS: &str =
    "id, title, category, description, image_path, sort_order, created_at, updated_at";

#[derive(Clone)]
pub struct GalleryRepository {
    pool: PgPool,
}

impl GalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> GalleryImage {
        GalleryImage {
            id: row.get("id"),
            title: row.get("title"),
            category: row.get("category"),
            description: row.get("description"),
            image_path: row.get("image_path"),
            sort_order: row.get("sort_order"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// List images in display order, optionally limited to one category
    pub async fn list(&self, category: Option<&str>) -> DatabaseResult<Vec<GalleryImage>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM gallery_images
            WHERE $1::TEXT IS NULL OR category = $1
            ORDER BY sort_order, created_at DESC
            "#,
            COLUMNS
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<GalleryImage>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM gallery_images WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn create(
        &self,
        fields: &GalleryFields,
        image_path: &str,
    ) -> DatabaseResult<GalleryImage> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO gallery_images (title, category, description, image_path, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&fields.title)
        .bind(&fields.category)
        .bind(&fields.description)
        .bind(image_path)
        .bind(fields.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(Self::map_row(&row))
    }

    /// Replace the text fields, and the stored image when `image_path` is set
    pub async fn update(
        &self,
        id: i64,
        fields: &GalleryFields,
        image_path: Option<&str>,
    ) -> DatabaseResult<Option<GalleryImage>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE gallery_images
            SET title = $2, category = $3, description = $4, sort_order = $5,
                image_path = COALESCE($6, image_path), updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.category)
        .bind(&fields.description)
        .bind(fields.sort_order)
        .bind(image_path)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    /// Delete an image row, returning the path of the file it referenced
    pub async fn delete(&self, id: i64) -> DatabaseResult<Option<String>> {
        sqlx::query_scalar("DELETE FROM gallery_images WHERE id = $1 RETURNING image_path")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }
}
