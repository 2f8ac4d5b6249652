//! Database operations for the books table.

use library_engine::{Book, BookId, PageRequest};
use sqlx::{PgExecutor, Row};

/// A stored book row from the database.
#[derive(Debug)]
pub struct StoredBook {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub amount: i32,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredBook {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(StoredBook {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            amount: row.try_get("amount")?,
        })
    }
}

impl StoredBook {
    /// Convert database row to an engine Book.
    pub fn into_book(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author: self.author,
            amount: self.amount,
        }
    }
}

/// Add one copy of a book, creating the row on first registration.
pub async fn upsert_book_copy<'e, E>(
    executor: E,
    title: &str,
    author: &str,
) -> Result<Book, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredBook>(
        r#"
        INSERT INTO books (title, author, amount)
        VALUES ($1, $2, 1)
        ON CONFLICT (title, author) DO UPDATE SET
            amount = books.amount + 1
        RETURNING id, title, author, amount
        "#,
    )
    .bind(title)
    .bind(author)
    .fetch_one(executor)
    .await?;

    Ok(stored.into_book())
}

/// Get a book by ID.
pub async fn get_book<'e, E>(executor: E, id: BookId) -> Result<Option<Book>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredBook>(
        r#"SELECT id, title, author, amount FROM books WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(stored.map(StoredBook::into_book))
}

/// Get a book by ID and lock its row until the transaction ends.
pub async fn lock_book<'e, E>(executor: E, id: BookId) -> Result<Option<Book>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredBook>(
        r#"SELECT id, title, author, amount FROM books WHERE id = $1 FOR UPDATE"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(stored.map(StoredBook::into_book))
}

/// Get a book by title and author and lock its row until the transaction ends.
pub async fn lock_book_by_info<'e, E>(
    executor: E,
    title: &str,
    author: &str,
) -> Result<Option<Book>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredBook>(
        r#"
        SELECT id, title, author, amount
        FROM books
        WHERE title = $1 AND author = $2
        FOR UPDATE
        "#,
    )
    .bind(title)
    .bind(author)
    .fetch_optional(executor)
    .await?;

    Ok(stored.map(StoredBook::into_book))
}

/// Overwrite title and author. Returns `None` if the book does not exist.
pub async fn update_book_info<'e, E>(
    executor: E,
    id: BookId,
    title: &str,
    author: &str,
) -> Result<Option<Book>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredBook>(
        r#"
        UPDATE books SET title = $2, author = $3
        WHERE id = $1
        RETURNING id, title, author, amount
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(author)
    .fetch_optional(executor)
    .await?;

    Ok(stored.map(StoredBook::into_book))
}

/// Store a new copy count.
pub async fn set_book_amount<'e, E>(executor: E, id: BookId, amount: i32) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(r#"UPDATE books SET amount = $2 WHERE id = $1"#)
        .bind(id)
        .bind(amount)
        .execute(executor)
        .await?;

    Ok(())
}

/// Delete a book row.
pub async fn delete_book<'e, E>(executor: E, id: BookId) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(r#"DELETE FROM books WHERE id = $1"#)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Get one page of books ordered by ID.
pub async fn list_books<'e, E>(executor: E, page: PageRequest) -> Result<Vec<Book>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredBook>(
        r#"
        SELECT id, title, author, amount
        FROM books
        ORDER BY id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(executor)
    .await?;

    Ok(stored.into_iter().map(StoredBook::into_book).collect())
}

/// Get one page of distinct titles among borrowed books, alphabetically.
pub async fn list_borrowed_titles<'e, E>(
    executor: E,
    page: PageRequest,
) -> Result<Vec<String>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT b.title
        FROM loans l
        JOIN books b ON b.id = l.book_id
        ORDER BY b.title ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(executor)
    .await
}

/// Get one page of borrowed book rows, one row per loan, in loan order.
pub async fn list_borrowed_book_rows<'e, E>(
    executor: E,
    page: PageRequest,
) -> Result<Vec<Book>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredBook>(
        r#"
        SELECT b.id, b.title, b.author, b.amount
        FROM loans l
        JOIN books b ON b.id = l.book_id
        ORDER BY l.id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(executor)
    .await?;

    Ok(stored.into_iter().map(StoredBook::into_book).collect())
}
