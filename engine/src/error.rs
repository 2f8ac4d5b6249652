//! Error types for the library engine.

use crate::{BookId, MemberId};
use thiserror::Error;

/// All possible errors from the library engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Lookup errors
    #[error("there is no book with such id: {0}")]
    BookNotFound(BookId),

    #[error("there is no book with title '{title}' and author '{author}'")]
    BookNotFoundByInfo { title: String, author: String },

    #[error("there is no member with such id: {0}")]
    MemberNotFound(MemberId),

    #[error("member {member_id} does not hold book {book_id}")]
    BookNotHeld { member_id: MemberId, book_id: BookId },

    // Business rule violations
    #[error("book {0} cannot be deleted while some of its copies are borrowed")]
    BookBorrowed(BookId),

    #[error("member {0} cannot be deleted until all borrowed books are returned")]
    MemberHasLoans(MemberId),

    #[error("member {0} is not allowed to borrow one more book")]
    QuotaExhausted(MemberId),

    #[error("book {0} is not available now")]
    NoCopiesAvailable(BookId),

    #[error("a book with title '{title}' and author '{author}' already exists")]
    DuplicateBook { title: String, author: String },

    // Validation errors
    #[error("invalid title: {0:?}")]
    InvalidTitle(String),

    #[error("invalid author name: {0:?}")]
    InvalidAuthorName(String),

    #[error("member name must not be blank")]
    BlankMemberName,

    #[error("id must be positive, got {0}")]
    InvalidId(i64),

    #[error("invalid pagination: {0}")]
    InvalidPagination(&'static str),
}

/// Broad classification of an [`Error`], used by transports to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An entity or a loan could not be found.
    NotFound,
    /// The request is well-formed but breaks a lending rule.
    Conflict,
    /// The request itself is malformed.
    Invalid,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BookNotFound(_)
            | Error::BookNotFoundByInfo { .. }
            | Error::MemberNotFound(_)
            | Error::BookNotHeld { .. } => ErrorKind::NotFound,
            Error::BookBorrowed(_)
            | Error::MemberHasLoans(_)
            | Error::QuotaExhausted(_)
            | Error::NoCopiesAvailable(_)
            | Error::DuplicateBook { .. } => ErrorKind::Conflict,
            Error::InvalidTitle(_)
            | Error::InvalidAuthorName(_)
            | Error::BlankMemberName
            | Error::InvalidId(_)
            | Error::InvalidPagination(_) => ErrorKind::Invalid,
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
