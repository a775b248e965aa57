//! Book copy list, detail and form pages

use maud::{html, Markup};
use serde::Serialize;

use super::{field_errors, stored, View};
use crate::{
    models::{BookInstanceDetail, BookInstanceInput, BookInstanceStatus, BookTitle},
    validation::FieldErrors,
};

#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceListView {
    pub bookinstance_list: Vec<BookInstanceDetail>,
}

impl View for BookInstanceListView {
    const TEMPLATE: &'static str = "bookinstance_list";

    fn title(&self) -> String {
        "Book Instance List".to_string()
    }

    fn content(&self) -> Markup {
        html! {
            ul {
                @for instance in &self.bookinstance_list {
                    li {
                        a href=(instance.url()) {
                            (stored(&instance.book.title)) " : " (stored(&instance.imprint))
                        }
                        " - "
                        span class=(instance.status.as_str()) { (instance.status.as_str()) }
                        @if instance.status != BookInstanceStatus::Available {
                            @if instance.due_back.is_some() {
                                span { " (Due: " (instance.due_back_formatted()) ")" }
                            }
                        }
                    }
                }
                @if self.bookinstance_list.is_empty() {
                    li { "There are no book copies in this library." }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceDetailView {
    pub bookinstance: BookInstanceDetail,
}

impl View for BookInstanceDetailView {
    const TEMPLATE: &'static str = "bookinstance_detail";

    fn title(&self) -> String {
        format!("Copy: {}", self.bookinstance.book.title)
    }

    fn content(&self) -> Markup {
        let instance = &self.bookinstance;
        html! {
            p { "ID: " (instance.id.to_string()) }
            p {
                strong { "Title:" } " "
                a href=(instance.book.url()) { (stored(&instance.book.title)) }
            }
            p { strong { "Imprint:" } " " (stored(&instance.imprint)) }
            p {
                strong { "Status:" } " "
                span class=(instance.status.as_str()) { (instance.status.as_str()) }
            }
            @if instance.status != BookInstanceStatus::Available && instance.due_back.is_some() {
                p { strong { "Due back:" } " " (instance.due_back_formatted()) }
            }
        }
    }
}

/// Create form. `selected_book` keeps the chosen book across a re-render.
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceFormView {
    pub title: &'static str,
    pub book_list: Vec<BookTitle>,
    pub selected_book: Option<String>,
    pub bookinstance: Option<BookInstanceInput>,
    pub errors: FieldErrors,
}

impl View for BookInstanceFormView {
    const TEMPLATE: &'static str = "bookinstance_form";

    fn title(&self) -> String {
        self.title.to_string()
    }

    fn content(&self) -> Markup {
        let input = self.bookinstance.clone().unwrap_or_default();
        let selected_book = self.selected_book.as_deref().unwrap_or_default();
        let status = input
            .status
            .parse::<BookInstanceStatus>()
            .unwrap_or_default();
        html! {
            form method="POST" {
                div class="form-group" {
                    label for="book" { "Book:" }
                    select #book name="book" required {
                        option value="" { "--Please select a book--" }
                        @for book in &self.book_list {
                            @let id = book.id.to_string();
                            option value=(id) selected[selected_book == id] {
                                (stored(&book.title))
                            }
                        }
                    }
                }
                div class="form-group" {
                    label for="imprint" { "Imprint:" }
                    input #imprint type="text" name="imprint"
                        placeholder="Publisher and date information"
                        required value=(stored(&input.imprint));
                }
                div class="form-group" {
                    label for="due_back" { "Date when book available:" }
                    input #due_back type="date" name="due_back"
                        value=(input.due_back.as_deref().unwrap_or_default());
                }
                div class="form-group" {
                    label for="status" { "Status:" }
                    select #status name="status" required {
                        @for option in BookInstanceStatus::ALL {
                            option value=(option.as_str()) selected[option == status] {
                                (option.as_str())
                            }
                        }
                    }
                }
                button type="submit" { "Submit" }
            }
            (field_errors(&self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn detail(status: BookInstanceStatus) -> BookInstanceDetail {
        BookInstanceDetail {
            id: Uuid::new_v4(),
            book: BookTitle {
                id: Uuid::new_v4(),
                title: "Dune".into(),
            },
            imprint: "Ace, 2005".into(),
            status,
            due_back: NaiveDate::from_ymd_opt(2026, 11, 2),
        }
    }

    #[test]
    fn test_detail_title_names_the_book() {
        let view = BookInstanceDetailView {
            bookinstance: detail(BookInstanceStatus::Loaned),
        };
        assert_eq!(view.title(), "Copy: Dune");

        let html = view.render().into_string();
        assert!(html.contains(r#"data-view="bookinstance_detail""#));
        assert!(html.contains("Nov 2, 2026"));
    }

    #[test]
    fn test_due_date_hidden_when_available() {
        let view = BookInstanceDetailView {
            bookinstance: detail(BookInstanceStatus::Available),
        };
        assert!(!view.render().into_string().contains("Due back"));
    }

    #[test]
    fn test_form_keeps_selected_book() {
        let book = BookTitle {
            id: Uuid::new_v4(),
            title: "Dune".into(),
        };
        let view = BookInstanceFormView {
            title: "Create Book Instance",
            selected_book: Some(book.id.to_string()),
            book_list: vec![book.clone()],
            bookinstance: None,
            errors: FieldErrors::new(),
        };

        let html = view.render().into_string();
        let expected = format!(r#"<option value="{}" selected>Dune</option>"#, book.id);
        assert!(html.contains(&expected));
    }
}
