//! Database operations for the loans join table.

use library_engine::{Book, BookId, Loan, LoanId, MemberId, PageRequest};
use sqlx::PgExecutor;

use super::StoredBook;

/// Record a new loan.
pub async fn insert_loan<'e, E>(
    executor: E,
    member_id: MemberId,
    book_id: BookId,
) -> Result<Loan, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO loans (member_id, book_id)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(member_id)
    .bind(book_id)
    .fetch_one(executor)
    .await?;

    Ok(Loan {
        id: result.0,
        member_id,
        book_id,
    })
}

/// Remove the oldest loan of a book by a member.
///
/// Returns the removed loan's ID, or `None` if the member does not hold it.
pub async fn delete_oldest_loan<'e, E>(
    executor: E,
    member_id: MemberId,
    book_id: BookId,
) -> Result<Option<LoanId>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>(
        r#"
        DELETE FROM loans
        WHERE id = (
            SELECT id FROM loans
            WHERE member_id = $1 AND book_id = $2
            ORDER BY id ASC
            LIMIT 1
        )
        RETURNING id
        "#,
    )
    .bind(member_id)
    .bind(book_id)
    .fetch_optional(executor)
    .await
}

/// Check if any member holds a copy of the book.
pub async fn book_is_borrowed<'e, E>(executor: E, book_id: BookId) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result: (bool,) =
        sqlx::query_as(r#"SELECT EXISTS(SELECT 1 FROM loans WHERE book_id = $1)"#)
            .bind(book_id)
            .fetch_one(executor)
            .await?;

    Ok(result.0)
}

/// Check if the member holds any book.
pub async fn member_has_loans<'e, E>(executor: E, member_id: MemberId) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result: (bool,) =
        sqlx::query_as(r#"SELECT EXISTS(SELECT 1 FROM loans WHERE member_id = $1)"#)
            .bind(member_id)
            .fetch_one(executor)
            .await?;

    Ok(result.0)
}

/// Get one page of books on loan to members with the given name, in loan order.
pub async fn list_books_by_member_name<'e, E>(
    executor: E,
    name: &str,
    page: PageRequest,
) -> Result<Vec<Book>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let stored = sqlx::query_as::<_, StoredBook>(
        r#"
        SELECT b.id, b.title, b.author, b.amount
        FROM members m
        JOIN loans l ON l.member_id = m.id
        JOIN books b ON b.id = l.book_id
        WHERE m.name = $1
        ORDER BY l.id ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(name)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(executor)
    .await?;

    Ok(stored.into_iter().map(StoredBook::into_book).collect())
}
