//! Book model, form input and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{author::Author, genre::Genre};
use crate::validation::{self, FieldErrors};

/// Canonical location of a book
pub fn book_url(id: Uuid) -> String {
    format!("/book/{}", id)
}

/// Book as stored: references kept as ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Book with author and genres expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetail {
    pub id: Uuid,
    pub title: String,
    pub author: Author,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Genre>,
}

impl BookDetail {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// List projection: title and expanded author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub author: Author,
}

impl BookSummary {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Selection projection: title only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct BookTitle {
    pub id: Uuid,
    pub title: String,
}

impl BookTitle {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Mutable fields of a book, used for both insert and full update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

/// Raw book form as posted.
///
/// `genre` decodes from zero, one or many `genre=` pairs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<String>,
}

impl BookForm {
    /// Trim and escape every field.
    pub fn sanitize(self) -> BookInput {
        BookInput {
            title: validation::clean(&self.title),
            author: validation::clean(&self.author),
            summary: validation::clean(&self.summary),
            isbn: validation::clean(&self.isbn),
            genre: self.genre.iter().map(|g| validation::escape(g)).collect(),
        }
    }
}

/// Sanitized book form, also used to re-populate the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct BookInput {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    pub genre: Vec<String>,
}

const BOOK_FIELDS: &[&str] = &["title", "author", "summary", "isbn", "genre"];

impl BookInput {
    /// Apply the field rules, returning the record to store or every failure.
    pub fn to_record(&self) -> Result<NewBook, FieldErrors> {
        let mut errors = FieldErrors::from_validation(self.validate(), BOOK_FIELDS);

        let author = validation::parse_id(&self.author);
        if author.is_none() && !self.author.is_empty() {
            errors.push("author", "Author must be a valid identifier.");
        }

        let mut genre = Vec::with_capacity(self.genre.len());
        for value in &self.genre {
            match validation::parse_id(value) {
                Some(id) if !genre.contains(&id) => genre.push(id),
                Some(_) => {}
                None => errors.push("genre", "Genre must be a valid identifier."),
            }
        }

        match author {
            Some(author) if errors.is_empty() => Ok(NewBook {
                title: self.title.clone(),
                author,
                summary: self.summary.clone(),
                isbn: self.isbn.clone(),
                genre,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&BookDetail> for BookInput {
    fn from(book: &BookDetail) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.iter().map(|g| g.id.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(author: Uuid, genre: Vec<String>) -> BookForm {
        BookForm {
            title: "  Dune ".into(),
            author: author.to_string(),
            summary: "Spice & sand".into(),
            isbn: "9780441013593".into(),
            genre,
        }
    }

    #[test]
    fn test_sanitize_trims_and_escapes() {
        let input = form(Uuid::new_v4(), vec![]).sanitize();
        assert_eq!(input.title, "Dune");
        assert_eq!(input.summary, "Spice &amp; sand");
    }

    #[test]
    fn test_valid_input_becomes_record() {
        let author = Uuid::new_v4();
        let genre = Uuid::new_v4();
        let record = form(author, vec![genre.to_string()])
            .sanitize()
            .to_record()
            .unwrap();

        assert_eq!(record.title, "Dune");
        assert_eq!(record.author, author);
        assert_eq!(record.genre, vec![genre]);
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let errors = BookForm::default().sanitize().to_record().unwrap_err();
        let messages: Vec<_> = errors.list().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Title must not be empty.",
                "Author must not be empty.",
                "Summary must not be empty.",
                "ISBN must not be empty.",
            ]
        );
    }

    #[test]
    fn test_whitespace_title_is_empty() {
        let mut raw = form(Uuid::new_v4(), vec![]);
        raw.title = "   ".into();
        let errors = raw.sanitize().to_record().unwrap_err();
        assert!(errors.has_field("title"));
        assert_eq!(errors.list().len(), 1);
    }

    #[test]
    fn test_bad_identifiers() {
        let mut raw = form(Uuid::new_v4(), vec!["sciFiId".into()]);
        raw.author = "frank".into();
        let errors = raw.sanitize().to_record().unwrap_err();
        assert!(errors.has_field("author"));
        assert!(errors.has_field("genre"));
    }

    #[test]
    fn test_duplicate_genres_collapse() {
        let genre = Uuid::new_v4();
        let other = Uuid::new_v4();
        let record = form(
            Uuid::new_v4(),
            vec![genre.to_string(), other.to_string(), genre.to_string()],
        )
        .sanitize()
        .to_record()
        .unwrap();
        assert_eq!(record.genre, vec![genre, other]);
    }
}
