//! Route definitions for the ASTRA Inventory Platform

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes. The state is threaded into the auth layer so token
/// verification reads the same configured secret the login path signs with.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Staff routes (login is public, the rest is protected)
        .nest("/staff", staff_routes(state.clone()))
        // Protected routes - category management
        .nest("/categories", category_routes(state.clone()))
        // Protected routes - location management
        .nest("/locations", location_routes(state.clone()))
        // Protected routes - product/inventory management
        .nest("/products", product_routes(state.clone()))
        // Protected routes - stock movement trail
        .nest("/movements", movement_routes(state.clone()))
        // Protected routes - login audit trail
        .nest("/logs", log_routes(state))
}

/// Staff routes: public login plus protected account management
fn staff_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/all", get(handlers::list_staff))
        .route("/add", post(handlers::create_staff))
        .route(
            "/:staff_id",
            get(handlers::get_staff)
                .put(handlers::update_staff)
                .delete(handlers::delete_staff),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/login", post(handlers::login))
}

/// Category management routes (protected; mutations require admin)
fn category_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:category_id",
            get(handlers::get_category).delete(handlers::delete_category),
        )
        .route("/:category_id/updateMinStock", patch(handlers::update_min_stock))
        .route("/:category_id/add-make", patch(handlers::add_make))
        .route("/:category_id/remove-make", patch(handlers::remove_make))
        .route("/:category_id/add-model", patch(handlers::add_model))
        .route("/:category_id/remove-model", patch(handlers::remove_model))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Location management routes (protected)
fn location_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route("/:location_id", get(handlers::get_location))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Product/inventory routes (protected)
fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::receive_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product).delete(handlers::delete_product),
        )
        .route("/:product_id/consume", patch(handlers::consume_product))
        .route("/:product_id/movements", get(handlers::get_product_movements))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Stock movement trail routes (protected)
fn movement_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_movements))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Audit log routes (protected, admin only in handlers)
fn log_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_logs))
        .route("/user/:user_id", get(handlers::list_logs_by_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
