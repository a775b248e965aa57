//! Home page with catalog counts

use maud::{html, Markup};
use serde::Serialize;

use super::View;

/// Counts shown on the home page. A count that failed to load is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardCounts {
    pub book_count: Option<i64>,
    pub book_instance_count: Option<i64>,
    pub book_instance_available_count: Option<i64>,
    pub author_count: Option<i64>,
    pub genre_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub counts: DashboardCounts,
    /// First count failure, shown instead of failing the page
    pub error: Option<String>,
}

fn count(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl View for Dashboard {
    const TEMPLATE: &'static str = "index";

    fn title(&self) -> String {
        "Local Library Home".to_string()
    }

    fn content(&self) -> Markup {
        html! {
            p { "Welcome to the local library catalog." }
            h2 { "Dynamic content" }
            @if let Some(error) = &self.error {
                p class="error" { "Error: " (error) }
            }
            p { "The library has the following record counts:" }
            ul {
                li { strong { "Books:" } " " (count(self.counts.book_count)) }
                li { strong { "Copies:" } " " (count(self.counts.book_instance_count)) }
                li {
                    strong { "Copies available:" } " "
                    (count(self.counts.book_instance_available_count))
                }
                li { strong { "Authors:" } " " (count(self.counts.author_count)) }
                li { strong { "Genres:" } " " (count(self.counts.genre_count)) }
            }
        }
    }
}
