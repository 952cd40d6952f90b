//! Route definitions for Stocky
//!
//! Reads of the catalog and journal are public; every write requires a bearer
//! token. User administration additionally requires the admin role.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{
    handlers,
    middleware::{auth_middleware, require_admin},
    AppState,
};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/products", product_routes(state.clone()))
        .nest("/movements", movement_routes(state.clone()))
        .nest("/categories", category_routes(state.clone()))
        .nest("/suppliers", supplier_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/tasks", task_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login));

    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Product routes
fn product_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handlers::list_products))
        .route("/stats", get(handlers::get_product_stats))
        .route("/breakdown", get(handlers::get_category_breakdown))
        .route("/low-stock", get(handlers::get_low_stock_products))
        .route("/:product_id", get(handlers::get_product));

    let protected = Router::new()
        .route("/", post(handlers::create_product))
        .route(
            "/:product_id",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Movement journal routes (append-only)
fn movement_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handlers::list_movements))
        .route("/recent", get(handlers::get_recent_movements))
        .route("/stats", get(handlers::get_movement_stats))
        .route("/top-selling", get(handlers::get_top_selling))
        .route("/trend", get(handlers::get_movement_trend))
        .route("/product/:product_id", get(handlers::get_movements_by_product))
        .route("/:movement_id", get(handlers::get_movement));

    let protected = Router::new()
        .route("/", post(handlers::create_movement))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Category routes
fn category_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handlers::list_categories))
        .route("/:category_id", get(handlers::get_category));

    let protected = Router::new()
        .route("/", post(handlers::create_category))
        .route(
            "/:category_id",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Supplier routes
fn supplier_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handlers::list_suppliers))
        .route("/:supplier_id", get(handlers::get_supplier));

    let protected = Router::new()
        .route("/", post(handlers::create_supplier))
        .route(
            "/:supplier_id",
            put(handlers::update_supplier).delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// User administration routes (admin only)
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:user_id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        // Layers run bottom-up: authenticate first, then check the role
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Personal task routes (protected)
fn task_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_tasks).post(handlers::create_task))
        .route(
            "/:task_id",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
