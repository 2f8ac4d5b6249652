//! Book endpoint routes.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use library_engine::{Book, BookRequest, BookTitleCount};

use crate::error::Result;
use crate::extract::{Paging, PathId, ValidJson};
use crate::handlers;
use crate::AppState;

/// Create book routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_handler).post(create_handler))
        .route("/books/borrowed-books-titles", get(borrowed_titles_handler))
        .route("/books/borrowed-books-info", get(borrowed_info_handler))
        .route(
            "/books/{id}",
            get(find_handler).put(update_handler).delete(delete_handler),
        )
}

/// POST /books - Register a copy of a book.
async fn create_handler(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<BookRequest>,
) -> Result<(StatusCode, Json<Book>)> {
    let book = handlers::create_book(&state.pool, request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /books/{id} - Get a book.
async fn find_handler(State(state): State<AppState>, PathId(id): PathId) -> Result<Json<Book>> {
    let book = handlers::find_book(&state.pool, id).await?;
    Ok(Json(book))
}

/// GET /books - List books.
async fn list_handler(
    State(state): State<AppState>,
    Paging(page): Paging,
) -> Result<Json<Vec<Book>>> {
    let books = handlers::list_books(&state.pool, page).await?;
    Ok(Json(books))
}

/// PUT /books/{id} - Rename a book.
async fn update_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(request): ValidJson<BookRequest>,
) -> Result<Json<Book>> {
    let book = handlers::update_book(&state.pool, id, request).await?;
    Ok(Json(book))
}

/// DELETE /books/{id} - Delete a book nobody holds.
async fn delete_handler(State(state): State<AppState>, PathId(id): PathId) -> Result<StatusCode> {
    handlers::delete_book(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /books/borrowed-books-titles - Distinct titles currently on loan.
async fn borrowed_titles_handler(
    State(state): State<AppState>,
    Paging(page): Paging,
) -> Result<Json<Vec<String>>> {
    let titles = handlers::list_borrowed_titles(&state.pool, page).await?;
    Ok(Json(titles))
}

/// GET /books/borrowed-books-info - Borrowed rows per title, within one page.
async fn borrowed_info_handler(
    State(state): State<AppState>,
    Paging(page): Paging,
) -> Result<Json<Vec<BookTitleCount>>> {
    let counts = handlers::list_borrowed_title_counts(&state.pool, page).await?;
    Ok(Json(counts))
}
