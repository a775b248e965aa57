//! Book copy pages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use axum_extra::extract::Form;
use maud::Markup;

use super::{form_response, path_id};
use crate::{error::AppResult, models::BookInstanceForm, views::View, AppState};

pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<Markup> {
    Ok(state.services.book_instances.list().await?.render())
}

pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let id = path_id(&id, "Book copy not found.")?;
    Ok(state.services.book_instances.detail(id).await?.render())
}

pub async fn bookinstance_create_get(State(state): State<AppState>) -> AppResult<Markup> {
    Ok(state.services.book_instances.create_form().await?.render())
}

pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let outcome = state.services.book_instances.create(form).await?;
    Ok(form_response(outcome))
}

pub async fn bookinstance_update_get() -> (StatusCode, &'static str) {
    (StatusCode::NOT_IMPLEMENTED, "Book copy update: not implemented")
}

pub async fn bookinstance_update_post() -> (StatusCode, &'static str) {
    (StatusCode::NOT_IMPLEMENTED, "Book copy update: not implemented")
}

pub async fn bookinstance_delete_get() -> (StatusCode, &'static str) {
    (StatusCode::NOT_IMPLEMENTED, "Book copy delete: not implemented")
}

pub async fn bookinstance_delete_post() -> (StatusCode, &'static str) {
    (StatusCode::NOT_IMPLEMENTED, "Book copy delete: not implemented")
}
