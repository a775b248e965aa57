//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::book::BookTitle;
use crate::validation::{self, FieldErrors};

/// Canonical location of a book copy
pub fn book_instance_url(id: Uuid) -> String {
    format!("/bookinstance/{}", id)
}

/// Copy availability. Stored as its label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl std::str::FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown book instance status: {}", s))
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Book instance as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_due_back(self.due_back)
    }
}

/// Book instance with its book expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookInstanceDetail {
    pub id: Uuid,
    pub book: BookTitle,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceDetail {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_due_back(self.due_back)
    }
}

/// `Oct 19, 2026`, empty when no date is set
fn format_due_back(due_back: Option<NaiveDate>) -> String {
    due_back
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Fields of a new book instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookInstance {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

/// Raw book instance form as posted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookInstanceForm {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

impl BookInstanceForm {
    /// Trim and escape. `due_back` is only trimmed; empty means absent.
    pub fn sanitize(self) -> BookInstanceInput {
        let due_back = self.due_back.trim();
        BookInstanceInput {
            book: validation::clean(&self.book),
            imprint: validation::clean(&self.imprint),
            status: validation::clean(&self.status),
            due_back: (!due_back.is_empty()).then(|| due_back.to_string()),
        }
    }
}

/// Sanitized book instance form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct BookInstanceInput {
    #[validate(length(min = 1, message = "Book must be selected."))]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified."))]
    pub imprint: String,
    pub status: String,
    pub due_back: Option<String>,
}

const BOOK_INSTANCE_FIELDS: &[&str] = &["book", "imprint", "status", "due_back"];

impl BookInstanceInput {
    /// Apply the field rules, returning the record to store or every failure.
    pub fn to_record(&self) -> Result<NewBookInstance, FieldErrors> {
        let mut errors = FieldErrors::from_validation(self.validate(), BOOK_INSTANCE_FIELDS);

        let book = validation::parse_id(&self.book);
        if book.is_none() && !self.book.is_empty() {
            errors.push("book", "Book must be a valid identifier.");
        }

        let status = if self.status.is_empty() {
            Some(BookInstanceStatus::default())
        } else {
            self.status.parse::<BookInstanceStatus>().ok()
        };
        if status.is_none() {
            errors.push("status", "Invalid status.");
        }

        let due_back = match self.due_back.as_deref() {
            None => None,
            Some(raw) => {
                let parsed = validation::parse_iso_date(raw);
                if parsed.is_none() {
                    errors.push("due_back", "Invalid date");
                }
                parsed
            }
        };

        match (book, status) {
            (Some(book), Some(status)) if errors.is_empty() => Ok(NewBookInstance {
                book,
                imprint: self.imprint.clone(),
                status,
                due_back,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(book: Uuid) -> BookInstanceForm {
        BookInstanceForm {
            book: book.to_string(),
            imprint: " Ace, 2005 ".into(),
            status: "Available".into(),
            due_back: String::new(),
        }
    }

    #[test]
    fn test_status_round_trips_labels() {
        for status in BookInstanceStatus::ALL {
            assert_eq!(status.as_str().parse::<BookInstanceStatus>(), Ok(status));
        }
        assert!("Lost".parse::<BookInstanceStatus>().is_err());
    }

    #[test]
    fn test_valid_form() {
        let book = Uuid::new_v4();
        let record = form(book).sanitize().to_record().unwrap();
        assert_eq!(record.book, book);
        assert_eq!(record.imprint, "Ace, 2005");
        assert_eq!(record.status, BookInstanceStatus::Available);
        assert_eq!(record.due_back, None);
    }

    #[test]
    fn test_empty_status_defaults_to_maintenance() {
        let mut raw = form(Uuid::new_v4());
        raw.status = String::new();
        let record = raw.sanitize().to_record().unwrap();
        assert_eq!(record.status, BookInstanceStatus::Maintenance);
    }

    #[test]
    fn test_due_back_parsed() {
        let mut raw = form(Uuid::new_v4());
        raw.due_back = "2026-11-02".into();
        let record = raw.sanitize().to_record().unwrap();
        assert_eq!(record.due_back, NaiveDate::from_ymd_opt(2026, 11, 2));
    }

    #[test]
    fn test_invalid_date() {
        let mut raw = form(Uuid::new_v4());
        raw.due_back = "not-a-date".into();
        let errors = raw.sanitize().to_record().unwrap_err();
        assert_eq!(errors.list().len(), 1);
        assert_eq!(errors.list()[0].field, "due_back");
        assert_eq!(errors.list()[0].message, "Invalid date");
    }

    #[test]
    fn test_missing_imprint_and_book() {
        let errors = BookInstanceForm::default().sanitize().to_record().unwrap_err();
        assert!(errors.has_field("book"));
        assert!(errors.has_field("imprint"));
        assert!(!errors.has_field("due_back"));
    }

    #[test]
    fn test_unknown_status() {
        let mut raw = form(Uuid::new_v4());
        raw.status = "Lost".into();
        assert!(raw.sanitize().to_record().unwrap_err().has_field("status"));
    }

    #[test]
    fn test_due_back_formatted() {
        let instance = BookInstance {
            id: Uuid::new_v4(),
            book: Uuid::new_v4(),
            imprint: "Ace".into(),
            status: BookInstanceStatus::Loaned,
            due_back: NaiveDate::from_ymd_opt(2026, 10, 9),
        };
        assert_eq!(instance.due_back_formatted(), "Oct 9, 2026");
    }
}
