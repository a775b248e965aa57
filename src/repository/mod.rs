//! Repository layer: the store trait and its backends

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, BookDetail, BookInstance, BookInstanceDetail, BookInstanceStatus,
        BookSummary, BookTitle, Genre, NewAuthor, NewBook, NewBookInstance, NewGenre,
    },
};

pub use memory::MemoryStore;

/// Persistence operations used by the catalog services.
///
/// Lookups return `Ok(None)` for a missing record; turning that into a
/// 404 is the caller's decision. Writes referencing a missing author,
/// genre or book fail with [`AppError::UnknownReference`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check the backend is reachable
    async fn ping(&self) -> AppResult<()>;

    async fn count_books(&self) -> AppResult<i64>;

    /// Count copies, optionally only those with the given status
    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64>;

    async fn count_authors(&self) -> AppResult<i64>;

    async fn count_genres(&self) -> AppResult<i64>;

    async fn list_authors(&self) -> AppResult<Vec<Author>>;

    async fn list_genres(&self) -> AppResult<Vec<Genre>>;

    /// Title and expanded author of every book, sorted by title
    async fn list_books(&self) -> AppResult<Vec<BookSummary>>;

    /// Id and title of every book
    async fn list_book_titles(&self) -> AppResult<Vec<BookTitle>>;

    /// Book with author and genres expanded
    async fn find_book(&self, id: Uuid) -> AppResult<Option<BookDetail>>;

    /// Copies of one book
    async fn list_book_instances_for_book(&self, book: Uuid) -> AppResult<Vec<BookInstance>>;

    /// Every copy with its book expanded
    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetail>>;

    async fn find_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>>;

    async fn insert_book(&self, book: &NewBook) -> AppResult<Book>;

    /// Replace the mutable fields of an existing book
    async fn update_book(&self, id: Uuid, book: &NewBook) -> AppResult<Book>;

    async fn insert_book_instance(&self, instance: &NewBookInstance) -> AppResult<BookInstance>;

    async fn insert_author(&self, author: &NewAuthor) -> AppResult<Author>;

    async fn insert_genre(&self, genre: &NewGenre) -> AppResult<Genre>;
}

/// PostgreSQL repository holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub genres: genres::GenresRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Turn a foreign key violation into an `UnknownReference` error.
pub(crate) fn reference_error(e: sqlx::Error, what: &str) -> AppError {
    let foreign_key_violation = e
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23503")
        .unwrap_or(false);

    if foreign_key_violation {
        AppError::UnknownReference(format!("{} refers to a record that does not exist", what))
    } else {
        AppError::Database(e)
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn count_books(&self) -> AppResult<i64> {
        self.books.count().await
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        self.book_instances.count(status).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors.count().await
    }

    async fn count_genres(&self) -> AppResult<i64> {
        self.genres.count().await
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres.list().await
    }

    async fn list_books(&self) -> AppResult<Vec<BookSummary>> {
        self.books.list().await
    }

    async fn list_book_titles(&self) -> AppResult<Vec<BookTitle>> {
        self.books.list_titles().await
    }

    async fn find_book(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        self.books.get_by_id(id).await
    }

    async fn list_book_instances_for_book(&self, book: Uuid) -> AppResult<Vec<BookInstance>> {
        self.book_instances.list_for_book(book).await
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetail>> {
        self.book_instances.list().await
    }

    async fn find_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        self.book_instances.get_by_id(id).await
    }

    async fn insert_book(&self, book: &NewBook) -> AppResult<Book> {
        self.books.create(book).await
    }

    async fn update_book(&self, id: Uuid, book: &NewBook) -> AppResult<Book> {
        self.books.update(id, book).await
    }

    async fn insert_book_instance(&self, instance: &NewBookInstance) -> AppResult<BookInstance> {
        self.book_instances.create(instance).await
    }

    async fn insert_author(&self, author: &NewAuthor) -> AppResult<Author> {
        self.authors.create(author).await
    }

    async fn insert_genre(&self, genre: &NewGenre) -> AppResult<Genre> {
        self.genres.create(genre).await
    }
}
