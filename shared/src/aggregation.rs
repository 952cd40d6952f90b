//! Read-side aggregations over product and movement snapshots
//!
//! Everything here is a deterministic projection of the slices passed in:
//! dashboards recompute from scratch on every call.

use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{is_at_max_stock, is_low_stock};
use crate::models::{
    Category, Movement, MovementFilter, MovementType, Product, ProductFilter, ProductStatus,
    DEFAULT_CATEGORY_COLOR,
};
use crate::types::{MovementView, ProductSortField};

/// Number of movements in the `recent` view when no limit is given
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Headline numbers for the products dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    pub active_products: usize,
    pub low_stock_products: usize,
    pub total_value: Decimal,
    pub average_price: Decimal,
    pub total_stock: i64,
}

pub fn product_stats(products: &[Product]) -> ProductStats {
    let total_products = products.len();
    let active_products = products
        .iter()
        .filter(|p| p.status == ProductStatus::Active)
        .count();
    let low_stock_products = products
        .iter()
        .filter(|p| p.status == ProductStatus::LowStock)
        .count();
    let total_value: Decimal = products.iter().map(Product::value).sum();
    let price_sum: Decimal = products.iter().map(|p| p.price).sum();
    let average_price = if total_products == 0 {
        Decimal::ZERO
    } else {
        (price_sum / Decimal::from(total_products)).round_dp(2)
    };
    let total_stock = products.iter().map(|p| i64::from(p.stock)).sum();

    ProductStats {
        total_products,
        active_products,
        low_stock_products,
        total_value,
        average_price,
        total_stock,
    }
}

/// Stock and value held in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category_id: Uuid,
    pub name: String,
    pub color: String,
    pub product_count: usize,
    pub total_stock: i64,
    pub total_value: Decimal,
    /// At least one product at or below its minimum
    pub has_low_stock: bool,
    /// At least one product at or above its maximum
    pub has_overstock: bool,
}

/// Group stock and value by category.
///
/// Categories without products are reported with zeros; products whose
/// category is missing from `categories` get a row named after the product's
/// joined category name.
pub fn category_breakdown(products: &[Product], categories: &[Category]) -> Vec<CategoryBreakdown> {
    let mut rows: HashMap<Uuid, CategoryBreakdown> = categories
        .iter()
        .map(|c| {
            (
                c.id,
                CategoryBreakdown {
                    category_id: c.id,
                    name: c.name.clone(),
                    color: c.color.clone(),
                    product_count: 0,
                    total_stock: 0,
                    total_value: Decimal::ZERO,
                    has_low_stock: false,
                    has_overstock: false,
                },
            )
        })
        .collect();

    for product in products {
        let row = rows
            .entry(product.category_id)
            .or_insert_with(|| CategoryBreakdown {
                category_id: product.category_id,
                name: product.category_name.clone(),
                color: DEFAULT_CATEGORY_COLOR.to_string(),
                product_count: 0,
                total_stock: 0,
                total_value: Decimal::ZERO,
                has_low_stock: false,
                has_overstock: false,
            });
        row.product_count += 1;
        row.total_stock += i64::from(product.stock);
        row.total_value += product.value();
        row.has_low_stock |= is_low_stock(product.stock, product.min_stock);
        row.has_overstock |= is_at_max_stock(product.stock, product.max_stock);
    }

    let mut result: Vec<CategoryBreakdown> = rows.into_values().collect();
    result.sort_by(|a, b| a.name.cmp(&b.name).then(a.category_id.cmp(&b.category_id)));
    result
}

/// Products at or below their minimum, lowest stock first
pub fn low_stock_products(products: &[Product]) -> Vec<Product> {
    let mut low: Vec<Product> = products
        .iter()
        .filter(|p| is_low_stock(p.stock, p.min_stock))
        .cloned()
        .collect();
    low.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.name.cmp(&b.name)));
    low
}

/// Filter and sort a product list the way the products table does
pub fn filter_and_sort_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| match &needle {
            Some(needle) => {
                contains_ci(&p.name, needle)
                    || contains_ci(&p.sku, needle)
                    || p.supplier_name.as_deref().is_some_and(|s| contains_ci(s, needle))
                    || p.description.as_deref().is_some_and(|d| contains_ci(d, needle))
            }
            None => true,
        })
        .filter(|p| filter.category_id.map_or(true, |id| p.category_id == id))
        .filter(|p| filter.status.map_or(true, |status| p.status == status))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = match filter.sort_by {
            ProductSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ProductSortField::Stock => a.stock.cmp(&b.stock),
            ProductSortField::Price => a.price.cmp(&b.price),
            ProductSortField::LastUpdated => a.last_updated.cmp(&b.last_updated),
        };
        filter.order.apply(ordering).then_with(|| a.id.cmp(&b.id))
    });

    filtered
}

/// Totals for the movements dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementStats {
    pub total_movements: usize,
    pub entradas: usize,
    pub salidas: usize,
    /// Units received
    pub total_entradas: i64,
    /// Units shipped
    pub total_salidas: i64,
    /// Sum of `cost` over movements that carry one
    pub total_cost: Decimal,
}

pub fn movement_stats(movements: &[Movement]) -> MovementStats {
    let mut stats = MovementStats {
        total_movements: movements.len(),
        entradas: 0,
        salidas: 0,
        total_entradas: 0,
        total_salidas: 0,
        total_cost: Decimal::ZERO,
    };

    for movement in movements {
        match movement.movement_type {
            MovementType::Entrada => {
                stats.entradas += 1;
                stats.total_entradas += i64::from(movement.quantity);
            }
            MovementType::Salida => {
                stats.salidas += 1;
                stats.total_salidas += i64::from(movement.quantity);
            }
        }
        if let Some(cost) = movement.cost {
            stats.total_cost += cost;
        }
    }

    stats
}

/// A product ranked by units shipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingProduct {
    pub product_id: Uuid,
    pub product_name: String,
    pub category: String,
    pub total_sold: i64,
    /// `None` when the product is not part of the snapshot
    pub current_stock: Option<i32>,
}

/// Rank products by summed salida quantity, highest first.
///
/// Name and category come from the current product when available and fall
/// back to the movement snapshot. Movements of deleted products are skipped.
pub fn top_selling(movements: &[Movement], products: &[Product], limit: usize) -> Vec<TopSellingProduct> {
    let mut totals: HashMap<Uuid, (i64, &Movement)> = HashMap::new();
    for movement in movements
        .iter()
        .filter(|m| m.movement_type == MovementType::Salida)
    {
        let Some(product_id) = movement.product_id else {
            continue;
        };
        let entry = totals.entry(product_id).or_insert((0, movement));
        entry.0 += i64::from(movement.quantity);
    }

    let by_id: HashMap<Uuid, &Product> = products.iter().map(|p| (p.id, p)).collect();

    let mut ranked: Vec<TopSellingProduct> = totals
        .into_iter()
        .map(|(product_id, (total_sold, snapshot))| match by_id.get(&product_id) {
            Some(product) => TopSellingProduct {
                product_id,
                product_name: product.name.clone(),
                category: product.category_name.clone(),
                total_sold,
                current_stock: Some(product.stock),
            },
            None => TopSellingProduct {
                product_id,
                product_name: snapshot.product_name.clone(),
                category: snapshot.category.clone(),
                total_sold,
                current_stock: None,
            },
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_sold
            .cmp(&a.total_sold)
            .then_with(|| a.product_name.cmp(&b.product_name))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(limit);
    ranked
}

/// Units moved on one day within one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    pub date: NaiveDate,
    pub category: String,
    pub entradas: i64,
    pub salidas: i64,
}

/// Longest trend window the API accepts
pub const MAX_TREND_WINDOW_DAYS: u32 = 3650;

/// First day of a `window_days` window ending on `today` (inclusive).
/// Windows reaching past the calendar start at `NaiveDate::MIN`.
pub fn trend_window_start(today: NaiveDate, window_days: u32) -> NaiveDate {
    let back = u64::from(window_days.saturating_sub(1));
    today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN)
}

/// Bucket movement quantities by day and category over the trailing
/// `window_days` ending on `today` (inclusive), oldest day first.
pub fn movement_trend(movements: &[Movement], window_days: u32, today: NaiveDate) -> Vec<TrendBucket> {
    if window_days == 0 {
        return Vec::new();
    }
    let start = trend_window_start(today, window_days);

    let mut buckets: BTreeMap<(NaiveDate, String), (i64, i64)> = BTreeMap::new();
    for movement in movements {
        let day = movement.created_at.date_naive();
        if day < start || day > today {
            continue;
        }
        let bucket = buckets
            .entry((day, movement.category.clone()))
            .or_insert((0, 0));
        match movement.movement_type {
            MovementType::Entrada => bucket.0 += i64::from(movement.quantity),
            MovementType::Salida => bucket.1 += i64::from(movement.quantity),
        }
    }

    buckets
        .into_iter()
        .map(|((date, category), (entradas, salidas))| TrendBucket {
            date,
            category,
            entradas,
            salidas,
        })
        .collect()
}

/// Filter a movement list, newest first.
///
/// The `recent` view keeps the newest `filter.limit` (or `default_recent`)
/// entries of the filtered result.
pub fn filter_movements(movements: &[Movement], filter: &MovementFilter, default_recent: usize) -> Vec<Movement> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let category = filter
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "todos");

    let mut filtered: Vec<Movement> = movements
        .iter()
        .filter(|m| match &needle {
            Some(needle) => {
                contains_ci(&m.product_name, needle)
                    || contains_ci(&m.reason, needle)
                    || contains_ci(&m.user_name, needle)
                    || m.notes.as_deref().is_some_and(|n| contains_ci(n, needle))
            }
            None => true,
        })
        .filter(|m| filter.movement_type.map_or(true, |t| m.movement_type == t))
        .filter(|m| category.map_or(true, |c| m.category == c))
        .filter(|m| filter.date.map_or(true, |d| m.created_at.date_naive() == d))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

    if filter.view == MovementView::Recent {
        filtered.truncate(filter.limit.unwrap_or(default_recent));
    }

    filtered
}

/// `needle` must already be lowercase
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
