//! Movement journal service
//!
//! A movement is applied inside one transaction holding the product's row
//! lock: read the stock, compute the new level, append the journal entry and
//! write the stock back. Concurrent movements on one product serialize on the
//! lock, so the stock can never be observed going negative.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{CreateMovement, Movement, MovementFilter, ProductStatus};
use crate::services::{ensure, product::lock_product, ProductService};
use shared::{
    apply_movement, filter_movements, movement_stats, movement_trend, top_selling,
    trend_window_start, validate_cost, LedgerError, MovementStats, TopSellingProduct,
    TrendBucket, MAX_TREND_WINDOW_DAYS,
};

const MOVEMENT_SELECT: &str = r#"
    SELECT id, product_id, product_name, category, movement_type, quantity,
           previous_stock, new_stock, reason, user_name, cost, notes, created_at
    FROM movements
"#;

/// Movement service
#[derive(Clone)]
pub struct MovementService {
    db: PgPool,
}

impl MovementService {
    /// Create a new MovementService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply a movement to its product and record it in the journal.
    ///
    /// `actor` is the attribution used when the input names no user.
    pub async fn apply(&self, input: CreateMovement, actor: &str) -> AppResult<Movement> {
        input.validate()?;
        if let Some(cost) = input.cost {
            ensure("cost", validate_cost(cost))?;
        }

        let mut tx = self.db.begin().await?;
        let product = lock_product(&mut tx, input.product_id).await?;

        let change = apply_movement(product.stock, input.movement_type, input.quantity)
            .map_err(|err| {
                if let LedgerError::InsufficientStock {
                    available,
                    requested,
                } = err
                {
                    tracing::warn!(
                        product_id = %product.id,
                        available,
                        requested,
                        "Movement rejected: insufficient stock"
                    );
                }
                AppError::from(err)
            })?;

        let user_name = input.user_name.unwrap_or_else(|| actor.to_string());

        let movement = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements (product_id, product_name, category, movement_type, quantity,
                                   previous_stock, new_stock, reason, user_name, cost, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, product_id, product_name, category, movement_type, quantity,
                      previous_stock, new_stock, reason, user_name, cost, notes, created_at
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category_name)
        .bind(input.movement_type)
        .bind(input.quantity)
        .bind(change.previous_stock)
        .bind(change.new_stock)
        .bind(&input.reason)
        .bind(&user_name)
        .bind(input.cost)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        let status = ProductStatus::derive(change.new_stock, product.min_stock, product.is_active);

        sqlx::query(
            "UPDATE products SET stock = $2, status = $3, last_updated = NOW() WHERE id = $1",
        )
        .bind(product.id)
        .bind(change.new_stock)
        .bind(status)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            movement_id = %movement.id,
            product_id = %product.id,
            movement_type = %movement.movement_type,
            quantity = movement.quantity,
            previous_stock = change.previous_stock,
            new_stock = change.new_stock,
            "Movement applied"
        );

        Ok(movement)
    }

    /// Whole journal, newest first
    pub async fn all(&self) -> AppResult<Vec<Movement>> {
        let movements = sqlx::query_as::<_, Movement>(&format!(
            "{} ORDER BY created_at DESC, id DESC",
            MOVEMENT_SELECT
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(movements)
    }

    /// Filtered journal; `default_recent` sizes the recent view when no limit is given
    pub async fn list(&self, filter: &MovementFilter, default_recent: usize) -> AppResult<Vec<Movement>> {
        let movements = self.all().await?;
        Ok(filter_movements(&movements, filter, default_recent))
    }

    pub async fn get(&self, movement_id: Uuid) -> AppResult<Movement> {
        sqlx::query_as::<_, Movement>(&format!("{} WHERE id = $1", MOVEMENT_SELECT))
            .bind(movement_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Movement".to_string()))
    }

    pub async fn by_product(&self, product_id: Uuid) -> AppResult<Vec<Movement>> {
        let movements = sqlx::query_as::<_, Movement>(&format!(
            "{} WHERE product_id = $1 ORDER BY created_at DESC, id DESC",
            MOVEMENT_SELECT
        ))
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;
        Ok(movements)
    }

    /// Newest `limit` movements
    pub async fn recent(&self, limit: usize) -> AppResult<Vec<Movement>> {
        let movements = sqlx::query_as::<_, Movement>(&format!(
            "{} ORDER BY created_at DESC, id DESC LIMIT $1",
            MOVEMENT_SELECT
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.db)
        .await?;
        Ok(movements)
    }

    pub async fn stats(&self) -> AppResult<MovementStats> {
        let movements = self.all().await?;
        Ok(movement_stats(&movements))
    }

    /// Best sellers by units shipped
    pub async fn top_selling(&self, limit: usize) -> AppResult<Vec<TopSellingProduct>> {
        let movements = self.all().await?;
        let products = ProductService::new(self.db.clone()).all().await?;
        Ok(top_selling(&movements, &products, limit))
    }

    /// Daily per-category quantities over the trailing `days` (today included)
    pub async fn trend(&self, days: u32) -> AppResult<Vec<TrendBucket>> {
        check_trend_window(days)?;
        let today = Utc::now().date_naive();
        let since = trend_window_start(today, days);
        let movements = sqlx::query_as::<_, Movement>(&format!(
            "{} WHERE created_at >= $1 ORDER BY created_at",
            MOVEMENT_SELECT
        ))
        .bind(since.and_hms_opt(0, 0, 0).map(|t| t.and_utc()))
        .fetch_all(&self.db)
        .await?;
        Ok(movement_trend(&movements, days, today))
    }
}

pub fn check_trend_window(days: u32) -> AppResult<()> {
    if days > MAX_TREND_WINDOW_DAYS {
        return Err(AppError::validation(
            "days",
            format!("Trend window cannot exceed {} days", MAX_TREND_WINDOW_DAYS),
        ));
    }
    Ok(())
}
