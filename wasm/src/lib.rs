//! WebAssembly module for Stocky
//!
//! Lets the browser dashboard compute exactly what the API computes:
//! - Product and movement statistics
//! - Category breakdown, low-stock alerts, top sellers, movement trend
//! - Client-side filtering of product and movement lists
//! - Movement previews before submitting
//!
//! Collections cross the boundary as JSON strings in the API's own format.

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

use shared::{
    Category, Movement, MovementFilter, MovementType, Product, ProductFilter, ProductStatus,
};

// Re-export shared types for Rust consumers of the rlib
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

/// Status a product would have with these levels: "active", "inactive" or "low-stock"
#[wasm_bindgen]
pub fn derive_product_status(stock: i32, min_stock: i32, is_active: bool) -> String {
    ProductStatus::derive(stock, min_stock, is_active).to_string()
}

/// `{previousStock, newStock}` for a movement, or an error if it would be refused
#[wasm_bindgen]
pub fn preview_movement(previous_stock: i32, movement_type: &str, quantity: i32) -> Result<String, JsValue> {
    bridge::preview_movement(previous_stock, movement_type, quantity).map_err(js_error)
}

#[wasm_bindgen]
pub fn product_stats(products_json: &str) -> Result<String, JsValue> {
    bridge::product_stats(products_json).map_err(js_error)
}

#[wasm_bindgen]
pub fn category_breakdown(products_json: &str, categories_json: &str) -> Result<String, JsValue> {
    bridge::category_breakdown(products_json, categories_json).map_err(js_error)
}

#[wasm_bindgen]
pub fn low_stock_products(products_json: &str) -> Result<String, JsValue> {
    bridge::low_stock_products(products_json).map_err(js_error)
}

/// Filter and sort products with the same query object the API accepts
#[wasm_bindgen]
pub fn filter_products(products_json: &str, filter_json: &str) -> Result<String, JsValue> {
    bridge::filter_products(products_json, filter_json).map_err(js_error)
}

/// Filter movements with the same query object the API accepts
#[wasm_bindgen]
pub fn filter_movements(movements_json: &str, filter_json: &str, default_recent: usize) -> Result<String, JsValue> {
    bridge::filter_movements(movements_json, filter_json, default_recent).map_err(js_error)
}

#[wasm_bindgen]
pub fn movement_stats(movements_json: &str) -> Result<String, JsValue> {
    bridge::movement_stats(movements_json).map_err(js_error)
}

#[wasm_bindgen]
pub fn top_selling(movements_json: &str, products_json: &str, limit: usize) -> Result<String, JsValue> {
    bridge::top_selling(movements_json, products_json, limit).map_err(js_error)
}

/// `today` is the client's calendar date as `YYYY-MM-DD`
#[wasm_bindgen]
pub fn movement_trend(movements_json: &str, window_days: u32, today: &str) -> Result<String, JsValue> {
    bridge::movement_trend(movements_json, window_days, today).map_err(js_error)
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// JSON-in/JSON-out wrappers, kept free of `JsValue` so they run natively
mod bridge {
    use super::*;

    type BridgeResult = Result<String, String>;

    fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
    }

    fn to_json<T: Serialize>(value: &T) -> BridgeResult {
        serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
    }

    pub fn preview_movement(previous_stock: i32, movement_type: &str, quantity: i32) -> BridgeResult {
        let movement_type = match movement_type {
            "entrada" => MovementType::Entrada,
            "salida" => MovementType::Salida,
            other => return Err(format!("Unknown movement type: {}", other)),
        };
        let change = shared::apply_movement(previous_stock, movement_type, quantity)
            .map_err(|e| e.to_string())?;
        to_json(&change)
    }

    pub fn product_stats(products_json: &str) -> BridgeResult {
        let products: Vec<Product> = parse(products_json, "products")?;
        to_json(&shared::product_stats(&products))
    }

    pub fn category_breakdown(products_json: &str, categories_json: &str) -> BridgeResult {
        let products: Vec<Product> = parse(products_json, "products")?;
        let categories: Vec<Category> = parse(categories_json, "categories")?;
        to_json(&shared::category_breakdown(&products, &categories))
    }

    pub fn low_stock_products(products_json: &str) -> BridgeResult {
        let products: Vec<Product> = parse(products_json, "products")?;
        to_json(&shared::low_stock_products(&products))
    }

    pub fn filter_products(products_json: &str, filter_json: &str) -> BridgeResult {
        let products: Vec<Product> = parse(products_json, "products")?;
        let filter: ProductFilter = parse(filter_json, "filter")?;
        to_json(&shared::filter_and_sort_products(&products, &filter))
    }

    pub fn filter_movements(movements_json: &str, filter_json: &str, default_recent: usize) -> BridgeResult {
        let movements: Vec<Movement> = parse(movements_json, "movements")?;
        let filter: MovementFilter = parse(filter_json, "filter")?;
        to_json(&shared::filter_movements(&movements, &filter, default_recent))
    }

    pub fn movement_stats(movements_json: &str) -> BridgeResult {
        let movements: Vec<Movement> = parse(movements_json, "movements")?;
        to_json(&shared::movement_stats(&movements))
    }

    pub fn top_selling(movements_json: &str, products_json: &str, limit: usize) -> BridgeResult {
        let movements: Vec<Movement> = parse(movements_json, "movements")?;
        let products: Vec<Product> = parse(products_json, "products")?;
        to_json(&shared::top_selling(&movements, &products, limit))
    }

    pub fn movement_trend(movements_json: &str, window_days: u32, today: &str) -> BridgeResult {
        let movements: Vec<Movement> = parse(movements_json, "movements")?;
        let today = NaiveDate::parse_from_str(today, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date {}: {}", today, e))?;
        to_json(&shared::movement_trend(&movements, window_days, today))
    }
}
