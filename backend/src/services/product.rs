//! Product ledger service: CRUD over products plus the dashboard read models

use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{CreateProduct, Product, ProductFilter, ProductStatus, UpdateProduct};
use crate::services::ensure;
use shared::{
    category_breakdown, filter_and_sort_products, low_stock_products, product_stats,
    validate_price, validate_sku, validate_stock_thresholds, Category, CategoryBreakdown,
    ProductStats,
};

/// Product columns with the joined category and supplier names
pub(crate) const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.category_id, c.name AS category_name, p.stock, p.price,
           p.min_stock, p.max_stock, p.supplier_id, s.name AS supplier_name, p.sku,
           p.description, p.status, p.is_active, p.last_updated, p.created_at
    FROM products p
    JOIN categories c ON c.id = p.category_id
    LEFT JOIN suppliers s ON s.id = p.supplier_id
"#;

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product; status is derived from the initial stock
    pub async fn create(&self, input: CreateProduct) -> AppResult<Product> {
        input.validate()?;
        ensure("price", validate_price(input.price))?;
        ensure("sku", validate_sku(&input.sku))?;
        ensure(
            "minStock",
            validate_stock_thresholds(input.min_stock, input.max_stock),
        )?;

        let mut conn = self.db.acquire().await?;
        check_references(&mut conn, input.category_id, input.supplier_id).await?;
        check_sku_available(&mut conn, &input.sku, None).await?;

        let is_active = input.is_active.unwrap_or(true);
        let status = ProductStatus::derive(input.stock, input.min_stock, is_active);

        let product_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO products (name, category_id, stock, price, min_stock, max_stock,
                                  supplier_id, sku, description, status, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(input.category_id)
        .bind(input.stock)
        .bind(input.price)
        .bind(input.min_stock)
        .bind(input.max_stock)
        .bind(input.supplier_id)
        .bind(&input.sku)
        .bind(&input.description)
        .bind(status)
        .bind(is_active)
        .fetch_one(&mut *conn)
        .await
        .map_err(AppError::on_unique_violation("sku", "SKU already exists"))?;
        drop(conn);

        tracing::info!(product_id = %product_id, sku = %input.sku, "Product created");

        self.get(product_id).await
    }

    /// Partially update a product, re-deriving its status
    pub async fn update(&self, product_id: Uuid, input: UpdateProduct) -> AppResult<Product> {
        input.validate()?;

        let mut tx = self.db.begin().await?;
        let current = lock_product(&mut tx, product_id).await?;

        let name = input.name.unwrap_or(current.name);
        let category_id = input.category_id.unwrap_or(current.category_id);
        let stock = input.stock.unwrap_or(current.stock);
        let price = input.price.unwrap_or(current.price);
        let min_stock = input.min_stock.unwrap_or(current.min_stock);
        let max_stock = input.max_stock.unwrap_or(current.max_stock);
        let supplier_id = input.supplier_id.unwrap_or(current.supplier_id);
        let sku = input.sku.unwrap_or(current.sku);
        let description = input.description.unwrap_or(current.description);
        let is_active = input.is_active.unwrap_or(current.is_active);

        ensure("price", validate_price(price))?;
        ensure("sku", validate_sku(&sku))?;
        ensure("minStock", validate_stock_thresholds(min_stock, max_stock))?;

        check_references(&mut tx, category_id, supplier_id).await?;
        check_sku_available(&mut tx, &sku, Some(product_id)).await?;

        let status = ProductStatus::derive(stock, min_stock, is_active);

        sqlx::query(
            r#"
            UPDATE products
            SET name = $2, category_id = $3, stock = $4, price = $5, min_stock = $6,
                max_stock = $7, supplier_id = $8, sku = $9, description = $10,
                status = $11, is_active = $12, last_updated = NOW()
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .bind(&name)
        .bind(category_id)
        .bind(stock)
        .bind(price)
        .bind(min_stock)
        .bind(max_stock)
        .bind(supplier_id)
        .bind(&sku)
        .bind(&description)
        .bind(status)
        .bind(is_active)
        .execute(&mut *tx)
        .await
        .map_err(AppError::on_unique_violation("sku", "SKU already exists"))?;

        tx.commit().await?;

        self.get(product_id).await
    }

    /// Delete a product; its movements keep their snapshot with a null product id
    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        tracing::info!(product_id = %product_id, "Product deleted");
        Ok(())
    }

    pub async fn get(&self, product_id: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!("{} WHERE p.id = $1", PRODUCT_SELECT))
            .bind(product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// All products, unfiltered, by name
    pub async fn all(&self) -> AppResult<Vec<Product>> {
        let products =
            sqlx::query_as::<_, Product>(&format!("{} ORDER BY p.name, p.id", PRODUCT_SELECT))
                .fetch_all(&self.db)
                .await?;
        Ok(products)
    }

    /// Products matching `filter`, sorted as requested
    pub async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let products = self.all().await?;
        Ok(filter_and_sort_products(&products, filter))
    }

    pub async fn stats(&self) -> AppResult<ProductStats> {
        let products = self.all().await?;
        Ok(product_stats(&products))
    }

    /// Per-category totals, including empty categories
    pub async fn breakdown(&self) -> AppResult<Vec<CategoryBreakdown>> {
        let products = self.all().await?;
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, color, is_active, created_at FROM categories",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(category_breakdown(&products, &categories))
    }

    /// Products at or below their minimum, most critical first
    pub async fn low_stock(&self) -> AppResult<Vec<Product>> {
        let products = self.all().await?;
        Ok(low_stock_products(&products))
    }
}

async fn check_references(
    conn: &mut PgConnection,
    category_id: Uuid,
    supplier_id: Option<Uuid>,
) -> AppResult<()> {
    let category_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(category_id)
            .fetch_one(&mut *conn)
            .await?;
    if !category_exists {
        return Err(AppError::validation("categoryId", "Category does not exist"));
    }

    if let Some(supplier_id) = supplier_id {
        let supplier_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(supplier_id)
                .fetch_one(&mut *conn)
                .await?;
        if !supplier_exists {
            return Err(AppError::validation("supplierId", "Supplier does not exist"));
        }
    }

    Ok(())
}

async fn check_sku_available(
    conn: &mut PgConnection,
    sku: &str,
    exclude: Option<Uuid>,
) -> AppResult<()> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM products WHERE sku = $1 AND ($2::uuid IS NULL OR id <> $2))",
    )
    .bind(sku)
    .bind(exclude)
    .fetch_one(&mut *conn)
    .await?;

    if taken {
        return Err(AppError::conflict("sku", "SKU already exists"));
    }
    Ok(())
}

/// Load a product and hold its row lock until the transaction ends
pub(crate) async fn lock_product(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
) -> AppResult<Product> {
    sqlx::query_as::<_, Product>(&format!(
        "{} WHERE p.id = $1 FOR UPDATE OF p",
        PRODUCT_SELECT
    ))
    .bind(product_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Product".to_string()))
}
