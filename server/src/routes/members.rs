//! Member endpoint routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use library_engine::{validation, Book, BookRequest, Member, MemberRequest};

use crate::error::Result;
use crate::extract::{Paging, PathId, ValidJson};
use crate::handlers;
use crate::AppState;

/// Create member routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_handler).post(create_handler))
        .route(
            "/members/{id}",
            get(find_handler).put(update_handler).delete(delete_handler),
        )
        .route("/members/{id}/borrow", patch(borrow_handler))
        .route("/members/{id}/return", patch(return_handler))
        .route("/members/{id}/books", get(books_by_name_handler))
}

/// POST /members - Register a member.
async fn create_handler(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<MemberRequest>,
) -> Result<(StatusCode, Json<Member>)> {
    let member = handlers::register_member(&state.pool, &state.config.library, request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// GET /members - List members.
async fn list_handler(
    State(state): State<AppState>,
    Paging(page): Paging,
) -> Result<Json<Vec<Member>>> {
    let members = handlers::list_members(&state.pool, page).await?;
    Ok(Json(members))
}

/// GET /members/{id} - Get a member.
async fn find_handler(State(state): State<AppState>, PathId(id): PathId) -> Result<Json<Member>> {
    let member = handlers::find_member(&state.pool, id).await?;
    Ok(Json(member))
}

/// PUT /members/{id} - Rename a member.
async fn update_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(request): ValidJson<MemberRequest>,
) -> Result<Json<Member>> {
    let member = handlers::update_member(&state.pool, id, request).await?;
    Ok(Json(member))
}

/// DELETE /members/{id} - Delete a member holding no books.
async fn delete_handler(State(state): State<AppState>, PathId(id): PathId) -> Result<StatusCode> {
    handlers::delete_member(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /members/{id}/borrow - Borrow a book by title and author.
async fn borrow_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(request): ValidJson<BookRequest>,
) -> Result<Json<Member>> {
    let member = handlers::borrow_book(&state.pool, id, request).await?;
    Ok(Json(member))
}

/// PATCH /members/{id}/return - Return a book by title and author.
async fn return_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(request): ValidJson<BookRequest>,
) -> Result<Json<Member>> {
    let member = handlers::return_book(&state.pool, id, request).await?;
    Ok(Json(member))
}

/// GET /members/{name}/books - Books on loan to members with this name.
async fn books_by_name_handler(
    State(state): State<AppState>,
    Path(member_name): Path<String>,
    Paging(page): Paging,
) -> Result<Json<Vec<Book>>> {
    validation::validate_member_name(&member_name)?;
    let books = handlers::list_books_by_member_name(&state.pool, &member_name, page).await?;
    Ok(Json(books))
}
