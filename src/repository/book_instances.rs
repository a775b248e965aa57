//! Book instances repository for database operations

use chrono::NaiveDate;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use super::reference_error;
use crate::{
    error::AppResult,
    models::{
        book::BookTitle,
        book_instance::{BookInstance, BookInstanceDetail, BookInstanceStatus, NewBookInstance},
    },
};

/// Unknown labels fall back to the default status.
fn status_from_row(row: &PgRow) -> BookInstanceStatus {
    row.get::<String, _>("status").parse().unwrap_or_default()
}

fn detail_from_row(row: &PgRow) -> BookInstanceDetail {
    BookInstanceDetail {
        id: row.get("id"),
        book: BookTitle {
            id: row.get("book_id"),
            title: row.get("book_title"),
        },
        imprint: row.get("imprint"),
        status: status_from_row(row),
        due_back: row.get::<Option<NaiveDate>, _>("due_back"),
    }
}

const DETAIL_QUERY: &str = r#"
    SELECT bi.id, bi.imprint, bi.status, bi.due_back,
           b.id AS book_id, b.title AS book_title
    FROM book_instances bi
    JOIN books b ON b.id = bi.book_id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn count(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM book_instances WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    /// Every copy with its book title
    pub async fn list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let query = format!("{} ORDER BY bi.created_at, bi.id", DETAIL_QUERY);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(detail_from_row).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        let query = format!("{} WHERE bi.id = $1", DETAIL_QUERY);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(detail_from_row))
    }

    /// Copies of one book
    pub async fn list_for_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query(
            r#"
            SELECT id, book_id, imprint, status, due_back
            FROM book_instances
            WHERE book_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| BookInstance {
                id: r.get("id"),
                book: r.get("book_id"),
                imprint: r.get("imprint"),
                status: status_from_row(r),
                due_back: r.get("due_back"),
            })
            .collect())
    }

    pub async fn create(&self, instance: &NewBookInstance) -> AppResult<BookInstance> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(instance.book)
        .bind(&instance.imprint)
        .bind(instance.status.as_str())
        .bind(instance.due_back)
        .execute(&self.pool)
        .await
        .map_err(|e| reference_error(e, "Book copy"))?;

        tracing::debug!("Inserted book instance {}", id);
        Ok(BookInstance {
            id,
            book: instance.book,
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: instance.due_back,
        })
    }
}
