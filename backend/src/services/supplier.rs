//! Supplier service

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{CreateSupplier, Supplier, UpdateSupplier};
use crate::services::ensure;
use shared::validate_email;

const SUPPLIER_COLUMNS: &str =
    "id, name, email, phone, address, contact_person, notes, active, created_at";

#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

impl SupplierService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self, active: Option<bool>) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE ($1::boolean IS NULL OR active = $1) ORDER BY name",
            SUPPLIER_COLUMNS
        ))
        .bind(active)
        .fetch_all(&self.db)
        .await?;
        Ok(suppliers)
    }

    pub async fn get(&self, supplier_id: Uuid) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE id = $1",
            SUPPLIER_COLUMNS
        ))
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    pub async fn create(&self, input: CreateSupplier) -> AppResult<Supplier> {
        input.validate()?;

        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            INSERT INTO suppliers (name, email, phone, address, contact_person, notes, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            SUPPLIER_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.contact_person)
        .bind(&input.notes)
        .bind(input.active.unwrap_or(true))
        .fetch_one(&self.db)
        .await?;

        tracing::info!(supplier_id = %supplier.id, name = %supplier.name, "Supplier created");
        Ok(supplier)
    }

    pub async fn update(&self, supplier_id: Uuid, input: UpdateSupplier) -> AppResult<Supplier> {
        input.validate()?;
        let current = self.get(supplier_id).await?;

        let email = input.email.unwrap_or(current.email);
        if let Some(email) = &email {
            ensure("email", validate_email(email))?;
        }

        sqlx::query_as::<_, Supplier>(&format!(
            r#"
            UPDATE suppliers
            SET name = $2, email = $3, phone = $4, address = $5, contact_person = $6,
                notes = $7, active = $8
            WHERE id = $1
            RETURNING {}
            "#,
            SUPPLIER_COLUMNS
        ))
        .bind(supplier_id)
        .bind(input.name.unwrap_or(current.name))
        .bind(&email)
        .bind(input.phone.unwrap_or(current.phone))
        .bind(input.address.unwrap_or(current.address))
        .bind(input.contact_person.unwrap_or(current.contact_person))
        .bind(input.notes.unwrap_or(current.notes))
        .bind(input.active.unwrap_or(current.active))
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    /// Delete a supplier; its products keep existing without one
    pub async fn delete(&self, supplier_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        tracing::info!(supplier_id = %supplier_id, "Supplier deleted");
        Ok(())
    }
}
