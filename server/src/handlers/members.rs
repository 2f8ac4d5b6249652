//! Member handlers - registration and the borrow/return transitions.
//!
//! Borrow and return lock the member row first and the book row second, then
//! write both rows and the loan inside one transaction. Dropping the
//! transaction on an early return rolls everything back.

use crate::db;
use crate::error::Result;
use library_engine::{
    loan, Book, BookRequest, Error, LibraryConfig, Member, MemberId, MemberRequest, NewMember,
    PageRequest,
};
use sqlx::PgPool;

/// Register a member with today's date and the configured quota.
pub async fn register_member(
    pool: &PgPool,
    config: &LibraryConfig,
    request: MemberRequest,
) -> Result<Member> {
    let today = chrono::Local::now().date_naive();
    let new_member = NewMember::register(request, today, config);
    let member = db::insert_member(pool, &new_member).await?;

    tracing::info!(
        "Registered member {} with quota {}",
        member.id,
        member.available_book_amount
    );
    Ok(member)
}

/// Get a member by ID.
pub async fn find_member(pool: &PgPool, id: MemberId) -> Result<Member> {
    db::get_member(pool, id)
        .await?
        .ok_or_else(|| Error::MemberNotFound(id).into())
}

/// List members ordered by ID.
pub async fn list_members(pool: &PgPool, page: PageRequest) -> Result<Vec<Member>> {
    Ok(db::list_members(pool, page).await?)
}

/// Rename a member, keeping membership date and quota.
pub async fn update_member(pool: &PgPool, id: MemberId, request: MemberRequest) -> Result<Member> {
    db::update_member_name(pool, id, &request.name)
        .await?
        .ok_or_else(|| Error::MemberNotFound(id).into())
}

/// Delete a member who holds no books.
pub async fn delete_member(pool: &PgPool, id: MemberId) -> Result<()> {
    let mut tx = pool.begin().await?;

    db::lock_member(&mut *tx, id)
        .await?
        .ok_or(Error::MemberNotFound(id))?;

    if db::member_has_loans(&mut *tx, id).await? {
        return Err(Error::MemberHasLoans(id).into());
    }

    db::delete_member(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!("Deleted member {}", id);
    Ok(())
}

/// Lend one copy of a book to a member.
pub async fn borrow_book(pool: &PgPool, member_id: MemberId, request: BookRequest) -> Result<Member> {
    let mut tx = pool.begin().await?;

    let mut member = db::lock_member(&mut *tx, member_id)
        .await?
        .ok_or(Error::MemberNotFound(member_id))?;
    loan::check_quota(&member)?;

    let mut book = lock_requested_book(&mut tx, &request).await?;
    loan::borrow(&mut member, &mut book)?;

    db::set_book_amount(&mut *tx, book.id, book.amount).await?;
    db::set_member_quota(&mut *tx, member.id, member.available_book_amount).await?;
    let loan = db::insert_loan(&mut *tx, member.id, book.id).await?;
    tx.commit().await?;

    tracing::info!(
        "Member {} borrowed book {} (loan {}, {} left on shelf)",
        member.id,
        book.id,
        loan.id,
        book.amount
    );
    Ok(member)
}

/// Take one copy of a book back from a member.
pub async fn return_book(pool: &PgPool, member_id: MemberId, request: BookRequest) -> Result<Member> {
    let mut tx = pool.begin().await?;

    let mut member = db::lock_member(&mut *tx, member_id)
        .await?
        .ok_or(Error::MemberNotFound(member_id))?;
    let mut book = lock_requested_book(&mut tx, &request).await?;

    let loan_id = db::delete_oldest_loan(&mut *tx, member.id, book.id)
        .await?
        .ok_or(Error::BookNotHeld {
            member_id: member.id,
            book_id: book.id,
        })?;
    loan::give_back(&mut member, &mut book);

    db::set_book_amount(&mut *tx, book.id, book.amount).await?;
    db::set_member_quota(&mut *tx, member.id, member.available_book_amount).await?;
    tx.commit().await?;

    tracing::info!(
        "Member {} returned book {} (loan {})",
        member.id,
        book.id,
        loan_id
    );
    Ok(member)
}

/// List books on loan to members with the given name.
pub async fn list_books_by_member_name(
    pool: &PgPool,
    name: &str,
    page: PageRequest,
) -> Result<Vec<Book>> {
    Ok(db::list_books_by_member_name(pool, name, page).await?)
}

async fn lock_requested_book(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    request: &BookRequest,
) -> Result<Book> {
    db::lock_book_by_info(&mut **tx, &request.title, &request.author)
        .await?
        .ok_or_else(|| {
            Error::BookNotFoundByInfo {
                title: request.title.clone(),
                author: request.author.clone(),
            }
            .into()
        })
}
