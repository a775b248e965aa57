//! Book pages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use axum_extra::extract::Form;
use maud::Markup;

use super::{form_response, path_id};
use crate::{error::AppResult, models::BookForm, views::View, AppState};

const BOOK_NOT_FOUND: &str = "Book not found.";

/// Home page with catalog counts
pub async fn index(State(state): State<AppState>) -> Markup {
    state.services.books.dashboard().await.render()
}

pub async fn book_list(State(state): State<AppState>) -> AppResult<Markup> {
    Ok(state.services.books.list().await?.render())
}

pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let id = path_id(&id, BOOK_NOT_FOUND)?;
    Ok(state.services.books.detail(id).await?.render())
}

pub async fn book_create_get(State(state): State<AppState>) -> AppResult<Markup> {
    Ok(state.services.books.create_form().await?.render())
}

pub async fn book_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let outcome = state.services.books.create(form).await?;
    Ok(form_response(outcome))
}

pub async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let id = path_id(&id, BOOK_NOT_FOUND)?;
    Ok(state.services.books.update_form(id).await?.render())
}

pub async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let id = path_id(&id, BOOK_NOT_FOUND)?;
    let outcome = state.services.books.update(id, form).await?;
    Ok(form_response(outcome))
}

pub async fn book_delete_get() -> (StatusCode, &'static str) {
    (StatusCode::NOT_IMPLEMENTED, "Book delete: not implemented")
}

pub async fn book_delete_post() -> (StatusCode, &'static str) {
    (StatusCode::NOT_IMPLEMENTED, "Book delete: not implemented")
}
