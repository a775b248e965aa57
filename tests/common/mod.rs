//! Shared helpers: an app over the memory store and request shortcuts

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use library_catalog::{
    api::create_router,
    config::StorageBackend,
    models::{Author, Book, Genre, NewAuthor, NewBook, NewGenre},
    repository::{CatalogStore, MemoryStore},
    services::Services,
    AppConfig, AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    pub fn view(&self) -> Option<&str> {
        let start = self.body.find(r#"data-view=""#)? + r#"data-view=""#.len();
        let end = self.body[start..].find('"')?;
        Some(&self.body[start..start + end])
    }
}

pub fn app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let mut config = AppConfig::default();
    config.database.backend = StorageBackend::Memory;
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(store.clone())),
    };
    TestApp {
        store,
        router: create_router(state),
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn author(&self, first_name: &str, family_name: &str) -> Author {
        self.store
            .insert_author(&NewAuthor {
                first_name: first_name.into(),
                family_name: family_name.into(),
                date_of_birth: NaiveDate::from_ymd_opt(1920, 10, 8),
                date_of_death: None,
            })
            .await
            .unwrap()
    }

    pub async fn genre(&self, name: &str) -> Genre {
        self.store
            .insert_genre(&NewGenre { name: name.into() })
            .await
            .unwrap()
    }

    pub async fn book(&self, title: &str, author: &Author) -> Book {
        self.store
            .insert_book(&NewBook {
                title: title.into(),
                author: author.id,
                summary: "A summary".into(),
                isbn: "9780000000000".into(),
                genre: vec![],
            })
            .await
            .unwrap()
    }
}

/// `application/x-www-form-urlencoded` body, repeated keys kept in order
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

/// Id at the end of a canonical location such as `/book/{id}`
pub fn id_from_location(location: &str, prefix: &str) -> Uuid {
    location
        .strip_prefix(prefix)
        .and_then(|id| Uuid::parse_str(id).ok())
        .unwrap_or_else(|| panic!("unexpected location {}", location))
}
