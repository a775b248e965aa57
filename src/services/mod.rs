//! Business logic services

pub mod book_instances;
pub mod books;
pub mod seed;

use std::sync::Arc;

use crate::repository::CatalogStore;

/// Result of a form submission
pub enum FormOutcome<V> {
    /// Validation failed: re-render the form
    Invalid(V),
    /// Record saved: redirect to its location
    Saved(String),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn CatalogStore>,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            books: books::BooksService::new(store.clone()),
            book_instances: book_instances::BookInstancesService::new(store.clone()),
            store,
        }
    }
}
