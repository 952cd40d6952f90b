//! Category service

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Category, CreateCategory, UpdateCategory, DEFAULT_CATEGORY_COLOR};
use crate::services::ensure;
use shared::validate_hex_color;

const CATEGORY_COLUMNS: &str = "id, name, description, color, is_active, created_at";

#[derive(Clone)]
pub struct CategoryService {
    db: PgPool,
}

impl CategoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List categories by name, optionally only active or inactive ones
    pub async fn list(&self, active: Option<bool>) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE ($1::boolean IS NULL OR is_active = $1) ORDER BY name",
            CATEGORY_COLUMNS
        ))
        .bind(active)
        .fetch_all(&self.db)
        .await?;
        Ok(categories)
    }

    pub async fn get(&self, category_id: Uuid) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))
    }

    pub async fn create(&self, input: CreateCategory) -> AppResult<Category> {
        input.validate()?;
        let color = input
            .color
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());
        ensure("color", validate_hex_color(&color))?;

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (name, description, color, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(&color)
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(&self.db)
        .await
        .map_err(AppError::on_unique_violation(
            "name",
            "Category name already exists",
        ))?;

        tracing::info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn update(&self, category_id: Uuid, input: UpdateCategory) -> AppResult<Category> {
        input.validate()?;
        let current = self.get(category_id).await?;

        let color = input.color.unwrap_or(current.color);
        ensure("color", validate_hex_color(&color))?;

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = $2, description = $3, color = $4, is_active = $5
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(category_id)
        .bind(input.name.unwrap_or(current.name))
        .bind(input.description.unwrap_or(current.description))
        .bind(&color)
        .bind(input.is_active.unwrap_or(current.is_active))
        .fetch_optional(&self.db)
        .await
        .map_err(AppError::on_unique_violation(
            "name",
            "Category name already exists",
        ))?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

        Ok(category)
    }

    /// Delete a category that no product references
    pub async fn delete(&self, category_id: Uuid) -> AppResult<()> {
        let in_use = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(&self.db)
        .await?;

        if in_use {
            return Err(AppError::conflict(
                "category",
                "Category is still assigned to products",
            ));
        }

        // A product assigned after the check trips the RESTRICT key instead
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&self.db)
            .await
            .map_err(AppError::on_foreign_key_violation(
                "category",
                "Category is still assigned to products",
            ))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category".to_string()));
        }

        tracing::info!(category_id = %category_id, "Category deleted");
        Ok(())
    }
}
