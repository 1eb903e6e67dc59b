//! gateway-api - REST API layer for the gateway registry
//!
//! Exposes the Gateway and Peripheral services over HTTP/JSON under
//! `/api/v1`. Handlers are thin: they extract path and body, call a service,
//! and let [`ApiError`] map domain failures to status codes.
//!
//! # Usage
//!
//! ```ignore
//! use gateway_api::{create_router, AppState};
//! use gateway_core::Storage;
//!
//! let state = AppState::new(Storage::in_memory());
//! let router = create_router(state);
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Gateway routes
        .route(
            "/api/v1/gateways",
            get(handlers::gateways::list_gateways).post(handlers::gateways::create_gateway),
        )
        .route(
            "/api/v1/gateways/{serial_number}",
            get(handlers::gateways::get_gateway)
                .put(handlers::gateways::update_gateway)
                .delete(handlers::gateways::delete_gateway),
        )
        .route(
            "/api/v1/gateways/{serial_number}/peripherals",
            get(handlers::gateways::list_gateway_peripherals)
                .post(handlers::gateways::attach_peripheral),
        )
        .route(
            "/api/v1/gateways/{serial_number}/peripherals/{uid}",
            put(handlers::gateways::associate_peripheral)
                .delete(handlers::gateways::remove_peripheral),
        )
        // Peripheral routes
        .route(
            "/api/v1/peripherals",
            get(handlers::peripherals::list_peripherals)
                .post(handlers::peripherals::create_peripheral),
        )
        .route(
            "/api/v1/peripherals/associates/{associated}",
            get(handlers::peripherals::list_by_association),
        )
        .route(
            "/api/v1/peripherals/{uid}",
            get(handlers::peripherals::get_peripheral)
                .put(handlers::peripherals::update_peripheral)
                .delete(handlers::peripherals::delete_peripheral),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
