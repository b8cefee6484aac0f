//! Blog post repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::blog::{BlogPayload, BlogPost};

const COLUMNS: &str = "id, title, slug, excerpt, content, image, author, category, tags, published, created_at, updated_at";

#[derive(Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> BlogPost {
        BlogPost {
            id: row.get("id"),
            title: row.get("title"),
            slug: row.get("slug"),
            excerpt: row.get("excerpt"),
            content: row.get("content"),
            image: row.get("image"),
            author: row.get("author"),
            category: row.get("category"),
            tags: row.get("tags"),
            published: row.get("published"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// List posts, newest first
    pub async fn list(
        &self,
        category: Option<&str>,
        include_unpublished: bool,
    ) -> DatabaseResult<Vec<BlogPost>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM blog_posts
            WHERE (published OR $2) AND ($1::TEXT IS NULL OR category = $1)
            ORDER BY created_at DESC, id DESC
            "#,
            COLUMNS
        ))
        .bind(category)
        .bind(include_unpublished)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<BlogPost>> {
        let row = sqlx::query(&format!("SELECT {} FROM blog_posts WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn find_by_slug(&self, slug: &str) -> DatabaseResult<Option<BlogPost>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM blog_posts WHERE slug = $1",
            COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn create(&self, payload: &BlogPayload) -> DatabaseResult<BlogPost> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO blog_posts
                (title, slug, excerpt, content, image, author, category, tags, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&payload.title)
        .bind(payload.slug())
        .bind(&payload.excerpt)
        .bind(&payload.content)
        .bind(&payload.image)
        .bind(&payload.author)
        .bind(&payload.category)
        .bind(&payload.tags)
        .bind(payload.published)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(Self::map_row(&row))
    }

    pub async fn update(&self, id: i64, payload: &BlogPayload) -> DatabaseResult<Option<BlogPost>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE blog_posts
            SET title = $2, slug = $3, excerpt = $4, content = $5, image = $6, author = $7,
                category = $8, tags = $9, published = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&payload.title)
        .bind(payload.slug())
        .bind(&payload.excerpt)
        .bind(&payload.content)
        .bind(&payload.image)
        .bind(&payload.author)
        .bind(&payload.category)
        .bind(&payload.tags)
        .bind(payload.published)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(Self::map_row))
    }

    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
