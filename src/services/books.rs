//! Book catalog service: home page counts and book pages

use std::sync::Arc;

use uuid::Uuid;

use super::FormOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{BookForm, BookInput, BookInstanceStatus},
    repository::CatalogStore,
    validation::FieldErrors,
    views::{BookDetailView, BookFormView, BookListView, Dashboard, DashboardCounts, GenreOption},
};

const CREATE_TITLE: &str = "Create Book";
const UPDATE_TITLE: &str = "Update Book";

fn book_not_found() -> AppError {
    AppError::NotFound("Book not found.".to_string())
}

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn CatalogStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Home page counts. A failed count degrades the page instead of failing it.
    pub async fn dashboard(&self) -> Dashboard {
        let store = &self.store;
        let (books, instances, available, authors, genres) = tokio::join!(
            store.count_books(),
            store.count_book_instances(None),
            store.count_book_instances(Some(BookInstanceStatus::Available)),
            store.count_authors(),
            store.count_genres(),
        );

        let mut error = None;
        let mut keep = |result: AppResult<i64>| match result {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!("Home page count failed: {}", e);
                error.get_or_insert_with(|| e.to_string());
                None
            }
        };

        let counts = DashboardCounts {
            book_count: keep(books),
            book_instance_count: keep(instances),
            book_instance_available_count: keep(available),
            author_count: keep(authors),
            genre_count: keep(genres),
        };

        Dashboard { counts, error }
    }

    /// All books with their author, sorted by title
    pub async fn list(&self) -> AppResult<BookListView> {
        Ok(BookListView {
            book_list: self.store.list_books().await?,
        })
    }

    /// One book with its copies
    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetailView> {
        let (book, book_instances) = tokio::try_join!(
            self.store.find_book(id),
            self.store.list_book_instances_for_book(id),
        )?;
        let book = book.ok_or_else(book_not_found)?;

        Ok(BookDetailView {
            book,
            book_instances,
        })
    }

    /// Empty create form
    pub async fn create_form(&self) -> AppResult<BookFormView> {
        self.form_view(CREATE_TITLE, None, FieldErrors::new()).await
    }

    /// Validate and save a new book
    pub async fn create(&self, form: BookForm) -> AppResult<FormOutcome<BookFormView>> {
        let input = form.sanitize();
        match input.to_record() {
            Err(errors) => {
                tracing::debug!("Book form rejected: {} error(s)", errors.list().len());
                let view = self.form_view(CREATE_TITLE, Some(input), errors).await?;
                Ok(FormOutcome::Invalid(view))
            }
            Ok(record) => {
                let book = self.store.insert_book(&record).await?;
                tracing::info!("Created book {} ({})", book.id, book.title);
                Ok(FormOutcome::Saved(book.url()))
            }
        }
    }

    /// Update form pre-filled with the stored book
    pub async fn update_form(&self, id: Uuid) -> AppResult<BookFormView> {
        let (book, authors, genres) = tokio::try_join!(
            self.store.find_book(id),
            self.store.list_authors(),
            self.store.list_genres(),
        )?;
        let book = book.ok_or_else(book_not_found)?;
        let input = BookInput::from(&book);

        Ok(BookFormView {
            title: UPDATE_TITLE,
            authors,
            genres: GenreOption::annotate(genres, &input.genre),
            book: Some(input),
            errors: FieldErrors::new(),
        })
    }

    /// Validate and replace the fields of an existing book
    pub async fn update(&self, id: Uuid, form: BookForm) -> AppResult<FormOutcome<BookFormView>> {
        let input = form.sanitize();
        match input.to_record() {
            Err(errors) => {
                tracing::debug!("Book {} update rejected: {} error(s)", id, errors.list().len());
                let view = self.form_view(UPDATE_TITLE, Some(input), errors).await?;
                Ok(FormOutcome::Invalid(view))
            }
            Ok(record) => {
                let book = self.store.update_book(id, &record).await?;
                tracing::info!("Updated book {} ({})", book.id, book.title);
                Ok(FormOutcome::Saved(book.url()))
            }
        }
    }

    /// Form with every author and genre, genres in `input` checked
    async fn form_view(
        &self,
        title: &'static str,
        input: Option<BookInput>,
        errors: FieldErrors,
    ) -> AppResult<BookFormView> {
        let (authors, genres) =
            tokio::try_join!(self.store.list_authors(), self.store.list_genres())?;
        let selected = input.as_ref().map(|i| i.genre.as_slice()).unwrap_or_default();

        Ok(BookFormView {
            title,
            authors,
            genres: GenreOption::annotate(genres, selected),
            book: input,
            errors,
        })
    }
}
