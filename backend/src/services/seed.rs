//! Sample data for demo installations
//!
//! Runs only against an empty catalog. Stock reaches its sample levels through
//! the movement journal, so every seeded movement satisfies the ledger rules.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::{CreateCategory, CreateMovement, CreateProduct, CreateSupplier, MovementType};
use crate::services::{CategoryService, MovementService, ProductService, SupplierService};

/// (name, description, color)
const SAMPLE_CATEGORIES: [(&str, &str, &str); 5] = [
    ("Electrónicos", "Productos electrónicos y tecnología", "#3B82F6"),
    ("Ropa", "Vestimenta y accesorios", "#EF4444"),
    ("Hogar", "Artículos para el hogar", "#10B981"),
    ("Deportes", "Equipamiento deportivo", "#F59E0B"),
    ("Libros", "Libros y material educativo", "#8B5CF6"),
];

struct SampleProduct {
    name: &'static str,
    category: &'static str,
    stock: i32,
    /// Price in cents
    price_cents: i64,
    min_stock: i32,
    max_stock: i32,
    supplier: &'static str,
    sku: &'static str,
    description: &'static str,
}

const SAMPLE_PRODUCTS: [SampleProduct; 6] = [
    SampleProduct {
        name: "Laptop HP Pavilion",
        category: "Electrónicos",
        stock: 0,
        price_cents: 89999,
        min_stock: 5,
        max_stock: 50,
        supplier: "HP Inc.",
        sku: "LAP-HP-001",
        description: "Laptop de 15 pulgadas con procesador Intel i5",
    },
    SampleProduct {
        name: "Smartphone Samsung Galaxy",
        category: "Electrónicos",
        stock: 0,
        price_cents: 69999,
        min_stock: 10,
        max_stock: 100,
        supplier: "Samsung Electronics",
        sku: "PHN-SAM-001",
        description: "Smartphone Android con cámara de 48MP",
    },
    SampleProduct {
        name: "Camiseta de Algodón",
        category: "Ropa",
        stock: 100,
        price_cents: 2999,
        min_stock: 20,
        max_stock: 200,
        supplier: "TextilCorp",
        sku: "CLT-CAM-001",
        description: "Camiseta 100% algodón, talla M",
    },
    SampleProduct {
        name: "Sofá de 3 Plazas",
        category: "Hogar",
        stock: 8,
        price_cents: 59999,
        min_stock: 2,
        max_stock: 20,
        supplier: "MueblesPro",
        sku: "HOM-SOF-001",
        description: "Sofá moderno con tapizado de tela",
    },
    SampleProduct {
        name: "Pelota de Fútbol",
        category: "Deportes",
        stock: 30,
        price_cents: 4999,
        min_stock: 10,
        max_stock: 80,
        supplier: "DeportesMax",
        sku: "SPT-PEL-001",
        description: "Pelota oficial de fútbol profesional",
    },
    SampleProduct {
        name: "Libro de Programación",
        category: "Libros",
        stock: 3,
        price_cents: 3999,
        min_stock: 5,
        max_stock: 30,
        supplier: "EditorialTech",
        sku: "BOK-PRG-001",
        description: "Guía completa de JavaScript moderno",
    },
];

/// (sku, type, quantity, reason, user, cost in cents)
const SAMPLE_MOVEMENTS: [(&str, MovementType, i32, &str, &str, Option<i64>); 3] = [
    ("LAP-HP-001", MovementType::Entrada, 20, "Compra inicial", "Admin", Some(80000)),
    ("PHN-SAM-001", MovementType::Entrada, 30, "Compra inicial", "Admin", Some(65000)),
    ("LAP-HP-001", MovementType::Salida, 5, "Venta", "Vendedor1", None),
];

/// Populate an empty database with sample categories, suppliers, products and movements
pub async fn seed_sample_data(db: &PgPool) -> AppResult<()> {
    let has_categories = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories)")
        .fetch_one(db)
        .await?;

    if has_categories {
        tracing::info!("Catalog not empty, skipping sample data");
        return Ok(());
    }

    tracing::info!("Seeding sample data...");

    let categories = CategoryService::new(db.clone());
    let suppliers = SupplierService::new(db.clone());
    let products = ProductService::new(db.clone());
    let movements = MovementService::new(db.clone());

    let mut category_ids = Vec::with_capacity(SAMPLE_CATEGORIES.len());
    for (name, description, color) in SAMPLE_CATEGORIES {
        let category = categories
            .create(CreateCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
                color: Some(color.to_string()),
                is_active: Some(true),
            })
            .await?;
        category_ids.push((name, category.id));
    }

    let mut product_ids = Vec::with_capacity(SAMPLE_PRODUCTS.len());
    for sample in &SAMPLE_PRODUCTS {
        let Some(&(_, category_id)) = category_ids.iter().find(|(name, _)| *name == sample.category)
        else {
            continue;
        };

        let supplier = suppliers
            .create(CreateSupplier {
                name: sample.supplier.to_string(),
                email: None,
                phone: None,
                address: None,
                contact_person: None,
                notes: None,
                active: Some(true),
            })
            .await?;

        let product = products
            .create(CreateProduct {
                name: sample.name.to_string(),
                category_id,
                stock: sample.stock,
                price: Decimal::new(sample.price_cents, 2),
                min_stock: sample.min_stock,
                max_stock: sample.max_stock,
                supplier_id: Some(supplier.id),
                sku: sample.sku.to_string(),
                description: Some(sample.description.to_string()),
                is_active: Some(true),
            })
            .await?;
        product_ids.push((sample.sku, product.id));
    }

    for (sku, movement_type, quantity, reason, user, cost_cents) in SAMPLE_MOVEMENTS {
        let Some(&(_, product_id)) = product_ids.iter().find(|(s, _)| *s == sku) else {
            continue;
        };

        movements
            .apply(
                CreateMovement {
                    product_id,
                    movement_type,
                    quantity,
                    reason: reason.to_string(),
                    user_name: Some(user.to_string()),
                    cost: cost_cents.map(|c| Decimal::new(c, 2)),
                    notes: None,
                },
                user,
            )
            .await?;
    }

    tracing::info!(
        categories = category_ids.len(),
        products = product_ids.len(),
        movements = SAMPLE_MOVEMENTS.len(),
        "Sample data seeded"
    );

    Ok(())
}
