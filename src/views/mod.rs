//! Server-side HTML views.
//!
//! Each page has a view model built by the services and a `maud` renderer.
//! The layout tags `<main>` with the template name (`data-view="book_form"`)
//! so a response can be matched to the page that produced it.

pub mod book_instances;
pub mod books;
pub mod index;

use axum::http::StatusCode;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::validation::FieldErrors;

pub use book_instances::{BookInstanceDetailView, BookInstanceFormView, BookInstanceListView};
pub use books::{BookDetailView, BookFormView, BookListView, GenreOption};
pub use index::{Dashboard, DashboardCounts};

/// A renderable page
pub trait View {
    /// Template name, e.g. `book_form`
    const TEMPLATE: &'static str;

    fn title(&self) -> String;

    fn content(&self) -> Markup;

    fn render(&self) -> Markup {
        layout(&self.title(), Self::TEMPLATE, self.content())
    }
}

/// Text fields are escaped when they are written to the store, so they
/// are emitted as-is.
pub fn stored(text: &str) -> PreEscaped<&str> {
    PreEscaped(text)
}

/// Shared page chrome
pub fn layout(title: &str, template: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (stored(title)) }
            }
            body {
                nav {
                    ul {
                        li { a href="/" { "Home" } }
                        li { a href="/books" { "All books" } }
                        li { a href="/bookinstances" { "All book copies" } }
                        li { a href="/book/create" { "Create new book" } }
                        li { a href="/bookinstance/create" { "Create new book copy" } }
                    }
                }
                main data-view=(template) {
                    h1 { (stored(title)) }
                    (content)
                }
            }
        }
    }
}

/// Inline list of validation messages under a form
pub fn field_errors(errors: &FieldErrors) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="errors" {
                @for error in errors.list() {
                    li data-field=(error.field) { (error.message) }
                }
            }
        }
    }
}

/// Generic error page for 404s and store failures
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let content = html! {
        p class="error" { (message) }
        p { "Status " (status.as_u16()) }
    };
    layout(
        status.canonical_reason().unwrap_or("Error"),
        "error",
        content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_tags_template() {
        let page = layout("Book List", "book_list", html! { p { "x" } }).into_string();
        assert!(page.contains(r#"data-view="book_list""#));
        assert!(page.contains("<h1>Book List</h1>"));
    }

    #[test]
    fn test_field_errors_rendered() {
        let mut errors = FieldErrors::new();
        errors.push("title", "Title must not be empty.");
        let html = field_errors(&errors).into_string();
        assert!(html.contains("Title must not be empty."));
        assert!(html.contains(r#"data-field="title""#));

        assert_eq!(field_errors(&FieldErrors::new()).into_string(), "");
    }

    #[test]
    fn test_error_page() {
        let html = error_page(StatusCode::NOT_FOUND, "Book not found.").into_string();
        assert!(html.contains(r#"data-view="error""#));
        assert!(html.contains("Book not found."));
        assert!(html.contains("Status 404"));
    }
}
