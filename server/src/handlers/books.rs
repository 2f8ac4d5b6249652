//! Book handlers - inventory and borrowed-book reports.

use crate::db;
use crate::error::{is_unique_violation, Result};
use library_engine::{count_titles, Book, BookId, BookRequest, BookTitleCount, Error, PageRequest};
use sqlx::PgPool;

/// Register one copy of a book, merging with an existing title and author.
pub async fn create_book(pool: &PgPool, request: BookRequest) -> Result<Book> {
    let book = db::upsert_book_copy(pool, &request.title, &request.author).await?;

    tracing::info!(
        "Registered copy of book {} ({} on shelf)",
        book.id,
        book.amount
    );
    Ok(book)
}

/// Get a book by ID.
pub async fn find_book(pool: &PgPool, id: BookId) -> Result<Book> {
    db::get_book(pool, id)
        .await?
        .ok_or_else(|| Error::BookNotFound(id).into())
}

/// Rename a book, keeping its amount.
pub async fn update_book(pool: &PgPool, id: BookId, request: BookRequest) -> Result<Book> {
    match db::update_book_info(pool, id, &request.title, &request.author).await {
        Ok(Some(book)) => Ok(book),
        Ok(None) => Err(Error::BookNotFound(id).into()),
        Err(e) if is_unique_violation(&e) => Err(Error::DuplicateBook {
            title: request.title,
            author: request.author,
        }
        .into()),
        Err(e) => Err(e.into()),
    }
}

/// Delete a book unless a member is holding a copy.
pub async fn delete_book(pool: &PgPool, id: BookId) -> Result<()> {
    let mut tx = pool.begin().await?;

    db::lock_book(&mut *tx, id)
        .await?
        .ok_or(Error::BookNotFound(id))?;

    if db::book_is_borrowed(&mut *tx, id).await? {
        return Err(Error::BookBorrowed(id).into());
    }

    db::delete_book(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!("Deleted book {}", id);
    Ok(())
}

/// List books ordered by ID.
pub async fn list_books(pool: &PgPool, page: PageRequest) -> Result<Vec<Book>> {
    Ok(db::list_books(pool, page).await?)
}

/// List distinct titles of borrowed books.
pub async fn list_borrowed_titles(pool: &PgPool, page: PageRequest) -> Result<Vec<String>> {
    Ok(db::list_borrowed_titles(pool, page).await?)
}

/// Count borrowed rows per title within one page of loans.
pub async fn list_borrowed_title_counts(
    pool: &PgPool,
    page: PageRequest,
) -> Result<Vec<BookTitleCount>> {
    let rows = db::list_borrowed_book_rows(pool, page).await?;
    Ok(count_titles(&rows))
}
