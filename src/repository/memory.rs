//! In-process store.
//!
//! Keeps every collection in insertion order behind one `RwLock`, with the
//! same reference checks the Postgres schema enforces through foreign keys.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, BookDetail, BookInstance, BookInstanceDetail, BookInstanceStatus,
        BookSummary, BookTitle, Genre, NewAuthor, NewBook, NewBookInstance, NewGenre,
    },
};

#[derive(Default)]
struct Collections {
    authors: IndexMap<Uuid, Author>,
    genres: IndexMap<Uuid, Genre>,
    books: IndexMap<Uuid, Book>,
    book_instances: IndexMap<Uuid, BookInstance>,
}

impl Collections {
    fn author(&self, id: Uuid) -> AppResult<&Author> {
        self.authors
            .get(&id)
            .ok_or_else(|| AppError::Internal(format!("Author {} is missing", id)))
    }

    fn book_title(&self, id: Uuid) -> AppResult<BookTitle> {
        self.books
            .get(&id)
            .map(|b| BookTitle {
                id: b.id,
                title: b.title.clone(),
            })
            .ok_or_else(|| AppError::Internal(format!("Book {} is missing", id)))
    }

    fn expand_book(&self, book: &Book) -> AppResult<BookDetail> {
        let genre = book
            .genre
            .iter()
            .map(|id| {
                self.genres
                    .get(id)
                    .cloned()
                    .ok_or_else(|| AppError::Internal(format!("Genre {} is missing", id)))
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(BookDetail {
            id: book.id,
            title: book.title.clone(),
            author: self.author(book.author)?.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre,
        })
    }

    fn expand_book_instance(&self, instance: &BookInstance) -> AppResult<BookInstanceDetail> {
        Ok(BookInstanceDetail {
            id: instance.id,
            book: self.book_title(instance.book)?,
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: instance.due_back,
        })
    }

    fn check_book_references(&self, book: &NewBook) -> AppResult<()> {
        if !self.authors.contains_key(&book.author) {
            return Err(AppError::UnknownReference(
                "Book author refers to a record that does not exist".to_string(),
            ));
        }
        if book.genre.iter().any(|id| !self.genres.contains_key(id)) {
            return Err(AppError::UnknownReference(
                "Book genre refers to a record that does not exist".to_string(),
            ));
        }
        Ok(())
    }
}

/// Memory-backed [`CatalogStore`]
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.books.len() as i64)
    }

    async fn count_book_instances(&self, status: Option<BookInstanceStatus>) -> AppResult<i64> {
        let data = self.inner.read().await;
        let total = data
            .book_instances
            .values()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count();
        Ok(total as i64)
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.authors.len() as i64)
    }

    async fn count_genres(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.genres.len() as i64)
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        Ok(self.inner.read().await.authors.values().cloned().collect())
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(self.inner.read().await.genres.values().cloned().collect())
    }

    async fn list_books(&self) -> AppResult<Vec<BookSummary>> {
        let data = self.inner.read().await;
        let mut books = data
            .books
            .values()
            .map(|b| {
                Ok(BookSummary {
                    id: b.id,
                    title: b.title.clone(),
                    author: data.author(b.author)?.clone(),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn list_book_titles(&self) -> AppResult<Vec<BookTitle>> {
        let data = self.inner.read().await;
        Ok(data
            .books
            .values()
            .map(|b| BookTitle {
                id: b.id,
                title: b.title.clone(),
            })
            .collect())
    }

    async fn find_book(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let data = self.inner.read().await;
        data.books
            .get(&id)
            .map(|book| data.expand_book(book))
            .transpose()
    }

    async fn list_book_instances_for_book(&self, book: Uuid) -> AppResult<Vec<BookInstance>> {
        let data = self.inner.read().await;
        Ok(data
            .book_instances
            .values()
            .filter(|i| i.book == book)
            .cloned()
            .collect())
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let data = self.inner.read().await;
        data.book_instances
            .values()
            .map(|i| data.expand_book_instance(i))
            .collect()
    }

    async fn find_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        let data = self.inner.read().await;
        data.book_instances
            .get(&id)
            .map(|i| data.expand_book_instance(i))
            .transpose()
    }

    async fn insert_book(&self, book: &NewBook) -> AppResult<Book> {
        let mut data = self.inner.write().await;
        data.check_book_references(book)?;

        let stored = Book {
            id: Uuid::new_v4(),
            title: book.title.clone(),
            author: book.author,
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.clone(),
        };
        data.books.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_book(&self, id: Uuid, book: &NewBook) -> AppResult<Book> {
        let mut data = self.inner.write().await;
        if !data.books.contains_key(&id) {
            return Err(AppError::NotFound("Book not found.".to_string()));
        }
        data.check_book_references(book)?;

        let stored = Book {
            id,
            title: book.title.clone(),
            author: book.author,
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.clone(),
        };
        data.books.insert(id, stored.clone());
        Ok(stored)
    }

    async fn insert_book_instance(&self, instance: &NewBookInstance) -> AppResult<BookInstance> {
        let mut data = self.inner.write().await;
        if !data.books.contains_key(&instance.book) {
            return Err(AppError::UnknownReference(
                "Book copy refers to a record that does not exist".to_string(),
            ));
        }

        let stored = BookInstance {
            id: Uuid::new_v4(),
            book: instance.book,
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: instance.due_back,
        };
        data.book_instances.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn insert_author(&self, author: &NewAuthor) -> AppResult<Author> {
        let stored = Author {
            id: Uuid::new_v4(),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        };
        self.inner
            .write()
            .await
            .authors
            .insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn insert_genre(&self, genre: &NewGenre) -> AppResult<Genre> {
        let stored = Genre {
            id: Uuid::new_v4(),
            name: genre.name.clone(),
        };
        self.inner
            .write()
            .await
            .genres
            .insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn author(store: &MemoryStore) -> Author {
        store
            .insert_author(&NewAuthor {
                first_name: "Frank".into(),
                family_name: "Herbert".into(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap()
    }

    fn new_book(title: &str, author: Uuid, genre: Vec<Uuid>) -> NewBook {
        NewBook {
            title: title.into(),
            author,
            summary: "summary".into(),
            isbn: "isbn".into(),
            genre,
        }
    }

    #[tokio::test]
    async fn test_list_books_sorted_by_title() {
        let store = MemoryStore::new();
        let author = author(&store).await;
        for title in ["Dune", "Children of Dune", "Dune Messiah", "Chapterhouse"] {
            store.insert_book(&new_book(title, author.id, vec![])).await.unwrap();
        }

        let titles: Vec<_> = store
            .list_books()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Chapterhouse", "Children of Dune", "Dune", "Dune Messiah"]);
    }

    #[tokio::test]
    async fn test_insert_book_checks_references() {
        let store = MemoryStore::new();
        let err = store
            .insert_book(&new_book("Dune", Uuid::new_v4(), vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownReference(_)));

        let author = author(&store).await;
        let err = store
            .insert_book(&new_book("Dune", author.id, vec![Uuid::new_v4()]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownReference(_)));
        assert_eq!(store.count_books().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_book_expands_references() {
        let store = MemoryStore::new();
        let author = author(&store).await;
        let genre = store
            .insert_genre(&NewGenre {
                name: "Science Fiction".into(),
            })
            .await
            .unwrap();
        let book = store
            .insert_book(&new_book("Dune", author.id, vec![genre.id]))
            .await
            .unwrap();

        let found = store.find_book(book.id).await.unwrap().unwrap();
        assert_eq!(found.author, author);
        assert_eq!(found.genre, vec![genre]);
        assert!(store.find_book(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_book_keeps_id() {
        let store = MemoryStore::new();
        let author = author(&store).await;
        let book = store
            .insert_book(&new_book("Dune", author.id, vec![]))
            .await
            .unwrap();

        let updated = store
            .update_book(book.id, &new_book("Dune Messiah", author.id, vec![]))
            .await
            .unwrap();
        assert_eq!(updated.id, book.id);
        assert_eq!(store.count_books().await.unwrap(), 1);

        let missing = store
            .update_book(Uuid::new_v4(), &new_book("X", author.id, vec![]))
            .await
            .unwrap_err();
        assert!(matches!(missing, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_count_book_instances_by_status() {
        let store = MemoryStore::new();
        let author = author(&store).await;
        let book = store
            .insert_book(&new_book("Dune", author.id, vec![]))
            .await
            .unwrap();
        for status in [
            BookInstanceStatus::Available,
            BookInstanceStatus::Available,
            BookInstanceStatus::Loaned,
        ] {
            store
                .insert_book_instance(&NewBookInstance {
                    book: book.id,
                    imprint: "Ace".into(),
                    status,
                    due_back: None,
                })
                .await
                .unwrap();
        }

        assert_eq!(store.count_book_instances(None).await.unwrap(), 3);
        assert_eq!(
            store
                .count_book_instances(Some(BookInstanceStatus::Available))
                .await
                .unwrap(),
            2
        );
        assert_eq!(store.list_book_instances_for_book(book.id).await.unwrap().len(), 3);
    }
}
