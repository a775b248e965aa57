//! Books repository for database operations

use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use super::{authors::author_from_row, genres::GenresRepository, reference_error};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDetail, BookSummary, BookTitle, NewBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
    genres: GenresRepository,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            genres: GenresRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn count(&self) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Title and author of every book, sorted by title (byte order)
    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title,
                   a.id AS author_id, a.first_name AS author_first_name,
                   a.family_name AS author_family_name,
                   a.date_of_birth AS author_date_of_birth,
                   a.date_of_death AS author_date_of_death
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.title COLLATE "C", b.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| BookSummary {
                id: r.get("id"),
                title: r.get("title"),
                author: author_from_row(r),
            })
            .collect())
    }

    pub async fn list_titles(&self) -> AppResult<Vec<BookTitle>> {
        let books = sqlx::query_as::<_, BookTitle>(
            "SELECT id, title FROM books ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Get a book with its author and genres
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let row = sqlx::query(
            r#"
            SELECT b.id, b.title, b.summary, b.isbn,
                   a.id AS author_id, a.first_name AS author_first_name,
                   a.family_name AS author_family_name,
                   a.date_of_birth AS author_date_of_birth,
                   a.date_of_death AS author_date_of_death
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(BookDetail {
            id: row.get("id"),
            title: row.get("title"),
            author: author_from_row(&row),
            summary: row.get("summary"),
            isbn: row.get("isbn"),
            genre: self.genres.list_for_book(id).await?,
        }))
    }

    /// Insert a book and its genre links in one transaction
    pub async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(book.author)
        .bind(&book.summary)
        .bind(&book.isbn)
        .execute(&mut *tx)
        .await
        .map_err(|e| reference_error(e, "Book author"))?;

        Self::link_genres(&mut tx, id, &book.genre).await?;
        tx.commit().await?;

        tracing::debug!("Inserted book {}", id);
        Ok(Self::stored(id, book))
    }

    /// Replace title, author, summary, isbn and genres of an existing book
    pub async fn update(&self, id: Uuid, book: &NewBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, summary = $4, isbn = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(book.author)
        .bind(&book.summary)
        .bind(&book.isbn)
        .execute(&mut *tx)
        .await
        .map_err(|e| reference_error(e, "Book author"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book not found.".to_string()));
        }

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::link_genres(&mut tx, id, &book.genre).await?;
        tx.commit().await?;

        tracing::debug!("Updated book {}", id);
        Ok(Self::stored(id, book))
    }

    async fn link_genres(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        book_id: Uuid,
        genres: &[Uuid],
    ) -> AppResult<()> {
        for (position, genre_id) in genres.iter().enumerate() {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id, position) VALUES ($1, $2, $3)",
            )
            .bind(book_id)
            .bind(*genre_id)
            .bind(position as i32)
            .execute(&mut **tx)
            .await
            .map_err(|e| reference_error(e, "Book genre"))?;
        }
        Ok(())
    }

    fn stored(id: Uuid, book: &NewBook) -> Book {
        Book {
            id,
            title: book.title.clone(),
            author: book.author,
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.clone(),
        }
    }
}
