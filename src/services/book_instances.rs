//! Book copy service

use std::sync::Arc;

use uuid::Uuid;

use super::FormOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{BookInstanceForm, BookInstanceInput},
    repository::CatalogStore,
    validation::FieldErrors,
    views::{BookInstanceDetailView, BookInstanceFormView, BookInstanceListView},
};

const CREATE_TITLE: &str = "Create Book Instance";

#[derive(Clone)]
pub struct BookInstancesService {
    store: Arc<dyn CatalogStore>,
}

impl BookInstancesService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Every copy with its book
    pub async fn list(&self) -> AppResult<BookInstanceListView> {
        Ok(BookInstanceListView {
            bookinstance_list: self.store.list_book_instances().await?,
        })
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceDetailView> {
        let bookinstance = self
            .store
            .find_book_instance(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found.".to_string()))?;
        Ok(BookInstanceDetailView { bookinstance })
    }

    /// Empty create form listing every book
    pub async fn create_form(&self) -> AppResult<BookInstanceFormView> {
        self.form_view(None, FieldErrors::new()).await
    }

    /// Validate and save a new copy
    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<FormOutcome<BookInstanceFormView>> {
        let input = form.sanitize();
        match input.to_record() {
            Err(errors) => {
                tracing::debug!("Book copy form rejected: {} error(s)", errors.list().len());
                let view = self.form_view(Some(input), errors).await?;
                Ok(FormOutcome::Invalid(view))
            }
            Ok(record) => {
                let instance = self.store.insert_book_instance(&record).await?;
                tracing::info!("Created book copy {} of book {}", instance.id, instance.book);
                Ok(FormOutcome::Saved(instance.url()))
            }
        }
    }

    async fn form_view(
        &self,
        input: Option<BookInstanceInput>,
        errors: FieldErrors,
    ) -> AppResult<BookInstanceFormView> {
        let book_list = self.store.list_book_titles().await?;
        let selected_book = input
            .as_ref()
            .map(|i| i.book.clone())
            .filter(|book| !book.is_empty());

        Ok(BookInstanceFormView {
            title: CREATE_TITLE,
            book_list,
            selected_book,
            bookinstance: input,
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::BookTitle, repository::MockCatalogStore};

    fn service(store: MockCatalogStore) -> BookInstancesService {
        BookInstancesService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_detail_missing_copy_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book_instance().returning(|_| Ok(None));

        let err = service(store).detail(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_date_keeps_selected_book() {
        let book = BookTitle {
            id: Uuid::new_v4(),
            title: "Dune".into(),
        };
        let book_id = book.id;

        let mut store = MockCatalogStore::new();
        store
            .expect_list_book_titles()
            .returning(move || Ok(vec![book.clone()]));
        store.expect_insert_book_instance().never();

        let form = BookInstanceForm {
            book: book_id.to_string(),
            imprint: "Ace".into(),
            status: "Loaned".into(),
            due_back: "not-a-date".into(),
        };
        match service(store).create(form).await.unwrap() {
            FormOutcome::Invalid(view) => {
                assert_eq!(view.selected_book, Some(book_id.to_string()));
                assert_eq!(view.errors.list()[0].message, "Invalid date");
                assert_eq!(view.book_list.len(), 1);
            }
            FormOutcome::Saved(location) => panic!("unexpected redirect to {}", location),
        }
    }

    #[tokio::test]
    async fn test_insert_failure_propagates() {
        let mut store = MockCatalogStore::new();
        store.expect_insert_book_instance().returning(|_| {
            Err(AppError::UnknownReference(
                "Book copy refers to a record that does not exist".into(),
            ))
        });

        let form = BookInstanceForm {
            book: Uuid::new_v4().to_string(),
            imprint: "Ace".into(),
            ..BookInstanceForm::default()
        };
        let result = service(store).create(form).await;
        assert!(matches!(result, Err(AppError::UnknownReference(_))));
    }
}
