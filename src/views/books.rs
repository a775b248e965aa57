//! Book list, detail and form pages

use maud::{html, Markup};
use serde::Serialize;

use super::{field_errors, stored, View};
use crate::{
    models::{Author, BookDetail, BookInput, BookInstance, BookSummary, Genre},
    validation::{self, FieldErrors},
};

/// Genre offered on the book form, with its selection state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreOption {
    pub genre: Genre,
    pub checked: bool,
}

impl GenreOption {
    /// Mark every genre whose id appears in `selected`. Entries that are
    /// not ids never match.
    pub fn annotate(genres: Vec<Genre>, selected: &[String]) -> Vec<Self> {
        let selected: Vec<_> = selected
            .iter()
            .filter_map(|s| validation::parse_id(s))
            .collect();
        genres
            .into_iter()
            .map(|genre| {
                let checked = selected.contains(&genre.id);
                GenreOption { genre, checked }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookListView {
    pub book_list: Vec<BookSummary>,
}

impl View for BookListView {
    const TEMPLATE: &'static str = "book_list";

    fn title(&self) -> String {
        "Book List".to_string()
    }

    fn content(&self) -> Markup {
        html! {
            ul {
                @for book in &self.book_list {
                    li {
                        a href=(book.url()) { (stored(&book.title)) }
                        " (" (stored(&book.author.name())) ")"
                    }
                }
                @if self.book_list.is_empty() {
                    li { "There are no books." }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookDetailView {
    pub book: BookDetail,
    pub book_instances: Vec<BookInstance>,
}

impl View for BookDetailView {
    const TEMPLATE: &'static str = "book_detail";

    fn title(&self) -> String {
        self.book.title.clone()
    }

    fn content(&self) -> Markup {
        let book = &self.book;
        html! {
            p {
                strong { "Author:" } " " (stored(&book.author.name()))
                @let lifespan = book.author.lifespan();
                @if !lifespan.is_empty() { " (" (lifespan) ")" }
            }
            p { strong { "Summary:" } " " (stored(&book.summary)) }
            p { strong { "ISBN:" } " " (stored(&book.isbn)) }
            p {
                strong { "Genre:" } " "
                @for (i, genre) in book.genre.iter().enumerate() {
                    @if i > 0 { ", " }
                    (stored(&genre.name))
                }
            }
            div class="copies" {
                h2 { "Copies" }
                @for instance in &self.book_instances {
                    hr;
                    p class=(instance.status.as_str()) { (instance.status.as_str()) }
                    p { strong { "Imprint:" } " " (stored(&instance.imprint)) }
                    @if instance.due_back.is_some() {
                        p { strong { "Due back:" } " " (instance.due_back_formatted()) }
                    }
                    p { strong { "Id:" } " " a href=(instance.url()) { (instance.id.to_string()) } }
                }
                @if self.book_instances.is_empty() {
                    p { "There are no copies of this book in the library." }
                }
            }
            p { a href={ (book.url()) "/update" } { "Update book" } }
        }
    }
}

/// Create or update form. `book` holds the values to pre-fill.
#[derive(Debug, Clone, Serialize)]
pub struct BookFormView {
    pub title: &'static str,
    pub authors: Vec<Author>,
    pub genres: Vec<GenreOption>,
    pub book: Option<BookInput>,
    pub errors: FieldErrors,
}

impl View for BookFormView {
    const TEMPLATE: &'static str = "book_form";

    fn title(&self) -> String {
        self.title.to_string()
    }

    fn content(&self) -> Markup {
        let book = self.book.clone().unwrap_or_default();
        html! {
            form method="POST" {
                div class="form-group" {
                    label for="title" { "Title:" }
                    input #title type="text" name="title" placeholder="Name of book"
                        required value=(stored(&book.title));
                }
                div class="form-group" {
                    label for="author" { "Author:" }
                    select #author name="author" required {
                        option value="" { "--Please select an author--" }
                        @for author in &self.authors {
                            @let id = author.id.to_string();
                            option value=(id) selected[book.author == id] {
                                (stored(&author.name()))
                            }
                        }
                    }
                }
                div class="form-group" {
                    label for="summary" { "Summary:" }
                    textarea #summary name="summary" placeholder="Summary" required {
                        (stored(&book.summary))
                    }
                }
                div class="form-group" {
                    label for="isbn" { "ISBN:" }
                    input #isbn type="text" name="isbn" placeholder="ISBN13"
                        required value=(stored(&book.isbn));
                }
                div class="form-group" {
                    label { "Genre:" }
                    div {
                        @for option in &self.genres {
                            @let id = option.genre.id.to_string();
                            div class="genre-option" {
                                input type="checkbox" name="genre" id=(id) value=(id)
                                    checked[option.checked];
                                label for=(id) { (stored(&option.genre.name)) }
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
    use uuid::Uuid;

    fn genre(name: &str) -> Genre {
        Genre {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_annotate_marks_selected_only() {
        let fantasy = genre("Fantasy");
        let scifi = genre("Science Fiction");
        let selected = vec![scifi.id.to_string()];

        let options = GenreOption::annotate(vec![fantasy.clone(), scifi.clone()], &selected);
        assert_eq!(
            options,
            vec![
                GenreOption { genre: fantasy, checked: false },
                GenreOption { genre: scifi, checked: true },
            ]
        );
    }

    #[test]
    fn test_annotate_matches_ids_regardless_of_case() {
        let scifi = genre("Science Fiction");
        let selected = vec![scifi.id.to_string().to_uppercase(), "sciFiId".to_string()];

        let options = GenreOption::annotate(vec![scifi], &selected);
        assert!(options[0].checked);
    }

    #[test]
    fn test_annotate_leaves_genres_untouched() {
        let genres = vec![genre("Poetry")];
        let options = GenreOption::annotate(genres.clone(), &[]);
        assert_eq!(options[0].genre, genres[0]);
        assert!(!options[0].checked);
    }

    #[test]
    fn test_form_renders_checked_genres_and_errors() {
        let scifi = genre("Science Fiction");
        let mut errors = FieldErrors::new();
        errors.push("title", "Title must not be empty.");
        let view = BookFormView {
            title: "Create Book",
            authors: vec![],
            genres: GenreOption::annotate(vec![scifi.clone()], &[scifi.id.to_string()]),
            book: Some(BookInput {
                isbn: "9780441013593".into(),
                ..BookInput::default()
            }),
            errors,
        };

        let html = view.render().into_string();
        assert!(html.contains(r#"data-view="book_form""#));
        assert!(html.contains("checked"));
        assert!(html.contains(r#"value="9780441013593""#));
        assert!(html.contains("Title must not be empty."));
    }
}
