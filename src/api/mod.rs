//! API handlers for Libris REST endpoints
//!
//! The admin and portal route groups are independent callers of the same
//! injected services; neither reaches into the other.

pub mod admin;
pub mod events;
pub mod health;
pub mod openapi;
pub mod portal;

use axum::{
    extract::{FromRequest, FromRequestParts},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{
    error::{AppError, Severity},
    AppState,
};

/// JSON request body whose rejection is reported as an `AppError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameters whose rejection is reported as an `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// Query string whose rejection is reported as an `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// User-facing outcome of a successful operation
#[derive(Debug, Serialize, ToSchema)]
pub struct Notice {
    pub level: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Severity::Info,
            message: message.into(),
        }
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Admin
        .route("/admin/books", get(admin::list_books).post(admin::add_book))
        .route(
            "/admin/books/:id",
            get(admin::get_book).put(admin::edit_book).delete(admin::delete_book),
        )
        .route("/admin/loans", get(admin::list_loans))
        .route("/admin/patrons", get(admin::list_patrons))
        // Portal
        .route("/portal/books", get(portal::list_available))
        .route("/portal/borrow", post(portal::borrow))
        .route("/portal/return", post(portal::return_book))
        .route("/portal/patrons/:name/books", get(portal::list_borrowed))
        // Change notifications
        .route("/events", get(events::stream_events))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
