//! HTTP handlers and routing

pub mod book_instances;
pub mod books;
pub mod health;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::FormOutcome,
    validation,
    views::View,
    AppState,
};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Catalog home
        .route("/", get(books::index))
        // Books
        .route("/books", get(books::book_list))
        .route(
            "/book/create",
            get(books::book_create_get).post(books::book_create_post),
        )
        .route("/book/:id", get(books::book_detail))
        .route(
            "/book/:id/update",
            get(books::book_update_get).post(books::book_update_post),
        )
        .route(
            "/book/:id/delete",
            get(books::book_delete_get).post(books::book_delete_post),
        )
        // Book copies
        .route("/bookinstances", get(book_instances::bookinstance_list))
        .route(
            "/bookinstance/create",
            get(book_instances::bookinstance_create_get)
                .post(book_instances::bookinstance_create_post),
        )
        .route("/bookinstance/:id", get(book_instances::bookinstance_detail))
        .route(
            "/bookinstance/:id/update",
            get(book_instances::bookinstance_update_get)
                .post(book_instances::bookinstance_update_post),
        )
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::bookinstance_delete_get)
                .post(book_instances::bookinstance_delete_post),
        )
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .fallback(page_not_found)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn page_not_found() -> AppError {
    AppError::NotFound("Page not found.".to_string())
}

/// Parse a path identifier; anything that is not an id cannot name a record.
pub(crate) fn path_id(raw: &str, not_found: &str) -> AppResult<Uuid> {
    validation::parse_id(raw).ok_or_else(|| AppError::NotFound(not_found.to_string()))
}

/// Re-render the form, or redirect to the saved record
pub(crate) fn form_response<V: View>(outcome: FormOutcome<V>) -> Response {
    match outcome {
        FormOutcome::Invalid(view) => view.render().into_response(),
        FormOutcome::Saved(location) => Redirect::to(&location).into_response(),
    }
}
