//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, events, health, portal};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Book catalog and lending REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Admin
        admin::list_books,
        admin::get_book,
        admin::add_book,
        admin::edit_book,
        admin::delete_book,
        admin::list_loans,
        admin::list_patrons,
        // Portal
        portal::list_available,
        portal::borrow,
        portal::return_book,
        portal::list_borrowed,
        // Events
        events::stream_events,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::BookForm,
            crate::models::patron::Patron,
            crate::models::loan::LoanDetails,
            crate::models::loan::LoanRequest,
            crate::models::change::CatalogEvent,
            admin::BookResponse,
            crate::api::Notice,
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::Severity,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "admin", description = "Catalog maintenance"),
        (name = "portal", description = "Borrowing and returning"),
        (name = "events", description = "Change notifications")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
