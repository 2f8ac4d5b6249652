//! Loans and the borrow/return transitions.
//!
//! A loan ties one member to one book. Borrowing moves a copy from the shelf
//! to the member and spends one unit of the member's quota; returning undoes
//! both. The functions here only check and mutate the two rows in memory.
//! Callers are responsible for loading both rows under a lock and persisting
//! them together with the loan row.

use crate::{error::Result, Book, BookId, Error, LoanId, Member, MemberId};
use serde::{Deserialize, Serialize};

/// An active loan: one row of the member/book join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Identifies this loan among several of the same book by the same member
    pub id: LoanId,
    pub member_id: MemberId,
    pub book_id: BookId,
}

impl Loan {
    /// Whether this loan is keyed by the given member and book.
    pub fn links(&self, member_id: MemberId, book_id: BookId) -> bool {
        self.member_id == member_id && self.book_id == book_id
    }
}

/// Fail unless the member still has quota left.
pub fn check_quota(member: &Member) -> Result<()> {
    if member.can_borrow() {
        Ok(())
    } else {
        Err(Error::QuotaExhausted(member.id))
    }
}

/// Fail unless a copy of the book is on the shelf.
pub fn check_available(book: &Book) -> Result<()> {
    if book.is_available() {
        Ok(())
    } else {
        Err(Error::NoCopiesAvailable(book.id))
    }
}

/// Lend one copy of `book` to `member`.
///
/// Quota is checked before stock, and neither row is touched unless both
/// checks pass.
pub fn borrow(member: &mut Member, book: &mut Book) -> Result<()> {
    check_quota(member)?;
    check_available(book)?;

    book.amount -= 1;
    member.available_book_amount -= 1;
    Ok(())
}

/// Take one copy of `book` back from `member`.
///
/// The caller must already have removed the matching loan; this only restores
/// the two counters.
pub fn give_back(member: &mut Member, book: &mut Book) {
    book.amount += 1;
    member.available_book_amount += 1;
}
