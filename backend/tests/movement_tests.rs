//! Movement journal tests against PostgreSQL
//!
//! These need a database (`DATABASE_URL`); run with `cargo test -- --ignored`.
//! Each test gets a fresh database with migrations applied.

use rust_decimal::Decimal;
use sqlx::PgPool;
use stocky_backend::error::AppError;
use stocky_backend::services::{CategoryService, MovementService, ProductService};
use shared::{
    CreateCategory, CreateMovement, CreateProduct, MovementType, Product, ProductStatus,
    UpdateProduct,
};
use uuid::Uuid;

async fn create_product(pool: &PgPool, sku: &str, stock: i32, min_stock: i32) -> Product {
    let category = CategoryService::new(pool.clone())
        .create(CreateCategory {
            name: format!("Categoría {}", sku),
            description: None,
            color: None,
            is_active: None,
        })
        .await
        .unwrap();

    ProductService::new(pool.clone())
        .create(CreateProduct {
            name: format!("Producto {}", sku),
            category_id: category.id,
            stock,
            price: Decimal::new(4999, 2),
            min_stock,
            max_stock: 100,
            supplier_id: None,
            sku: sku.to_string(),
            description: None,
            is_active: None,
        })
        .await
        .unwrap()
}

fn movement(product_id: Uuid, movement_type: MovementType, quantity: i32) -> CreateMovement {
    CreateMovement {
        product_id,
        movement_type,
        quantity,
        reason: "Venta".to_string(),
        user_name: None,
        cost: None,
        notes: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_salida_updates_stock_and_status(pool: PgPool) {
    let product = create_product(&pool, "SCN-001", 20, 10).await;
    assert_eq!(product.status, ProductStatus::Active);

    let recorded = MovementService::new(pool.clone())
        .apply(movement(product.id, MovementType::Salida, 15), "vendedor1")
        .await
        .unwrap();

    assert_eq!(recorded.previous_stock, 20);
    assert_eq!(recorded.new_stock, 5);
    assert_eq!(recorded.user_name, "vendedor1");
    assert_eq!(recorded.product_name, product.name);
    assert_eq!(recorded.category, product.category_name);

    let reloaded = ProductService::new(pool.clone()).get(product.id).await.unwrap();
    assert_eq!(reloaded.stock, 5);
    assert_eq!(reloaded.status, ProductStatus::LowStock);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_concurrent_salidas_never_oversell(pool: PgPool) {
    let product = create_product(&pool, "CON-001", 1, 0).await;

    let first = {
        let service = MovementService::new(pool.clone());
        let input = movement(product.id, MovementType::Salida, 1);
        tokio::spawn(async move { service.apply(input, "caja1").await })
    };
    let second = {
        let service = MovementService::new(pool.clone());
        let input = movement(product.id, MovementType::Salida, 1);
        tokio::spawn(async move { service.apply(input, "caja2").await })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let refused = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::InsufficientStock { .. })))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(refused, 1);

    let reloaded = ProductService::new(pool.clone()).get(product.id).await.unwrap();
    assert_eq!(reloaded.stock, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_refused_movement_leaves_no_trace(pool: PgPool) {
    let product = create_product(&pool, "REF-001", 2, 0).await;
    let service = MovementService::new(pool.clone());

    let err = service
        .apply(movement(product.id, MovementType::Salida, 3), "vendedor1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InsufficientStock {
            available: 2,
            requested: 3
        }
    ));

    assert!(service.by_product(product.id).await.unwrap().is_empty());
    let reloaded = ProductService::new(pool.clone()).get(product.id).await.unwrap();
    assert_eq!(reloaded.stock, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_movement_on_missing_product_not_found(pool: PgPool) {
    let err = MovementService::new(pool)
        .apply(movement(Uuid::new_v4(), MovementType::Entrada, 1), "admin")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_deleted_product_keeps_movement_history(pool: PgPool) {
    let product = create_product(&pool, "DEL-001", 10, 2).await;
    let movements = MovementService::new(pool.clone());
    let recorded = movements
        .apply(movement(product.id, MovementType::Entrada, 5), "admin")
        .await
        .unwrap();

    ProductService::new(pool.clone())
        .delete(product.id)
        .await
        .unwrap();

    let kept = movements.get(recorded.id).await.unwrap();
    assert_eq!(kept.product_id, None);
    assert_eq!(kept.product_name, product.name);
    assert_eq!(kept.new_stock, 15);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_product_round_trip_and_duplicate_sku(pool: PgPool) {
    let product = create_product(&pool, "RND-001", 12, 4).await;
    let service = ProductService::new(pool.clone());

    let fetched = service.get(product.id).await.unwrap();
    assert_eq!(fetched.sku, "RND-001");
    assert_eq!(fetched.name, product.name);
    assert_eq!(fetched.min_stock, 4);
    assert_eq!(fetched.max_stock, 100);

    let duplicate = service
        .create(CreateProduct {
            name: "Otro".to_string(),
            category_id: product.category_id,
            stock: 1,
            price: Decimal::ONE,
            min_stock: 0,
            max_stock: 10,
            supplier_id: None,
            sku: "RND-001".to_string(),
            description: None,
            is_active: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(duplicate, AppError::Conflict { .. }));

    let updated = service
        .update(
            product.id,
            UpdateProduct {
                stock: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, ProductStatus::LowStock);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_product_update_checks_run_inside_transaction(pool: PgPool) {
    let first = create_product(&pool, "TXN-001", 10, 2).await;
    let second = create_product(&pool, "TXN-002", 10, 2).await;
    let service = ProductService::new(pool.clone());

    let taken = service
        .update(
            second.id,
            UpdateProduct {
                sku: Some("TXN-001".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(taken, AppError::Conflict { ref field, .. } if field == "sku"));

    let missing_category = service
        .update(
            second.id,
            UpdateProduct {
                category_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(missing_category, AppError::Validation { ref field, .. } if field == "categoryId"));

    // Refused updates release the row lock and change nothing
    let renamed = service
        .update(
            second.id,
            UpdateProduct {
                sku: Some("TXN-003".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.sku, "TXN-003");
    assert_eq!(renamed.category_id, second.category_id);
    assert_eq!(service.get(first.id).await.unwrap().sku, "TXN-001");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_category_in_use_cannot_be_deleted(pool: PgPool) {
    let product = create_product(&pool, "CAT-001", 5, 1).await;
    let categories = CategoryService::new(pool.clone());

    let err = categories.delete(product.category_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { ref field, .. } if field == "category"));

    ProductService::new(pool.clone())
        .delete(product.id)
        .await
        .unwrap();
    categories.delete(product.category_id).await.unwrap();
    assert!(matches!(
        categories.delete(product.category_id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}
