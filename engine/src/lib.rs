//! # Library Engine
//!
//! Lending rules for a small library backend: books with copy counts, members
//! with a loan quota, and the loans joining them.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never touches a database, the network or the clock
//! - **Shared rules**: the borrow/return checks in [`loan`] are the same ones
//!   the HTTP server runs inside its database transactions
//! - **Testable**: [`Library`] keeps the whole state in memory
//!
//! ## Core Concepts
//!
//! ### Books
//!
//! A [`Book`] is keyed naturally by title and author. Registering an existing
//! pair adds a copy instead of a new row. `amount` is the number of copies on
//! the shelf.
//!
//! ### Members
//!
//! A [`Member`] starts with the quota from [`LibraryConfig`] and spends one
//! unit per borrowed book.
//!
//! ### Loans
//!
//! A [`Loan`] links one member to one book. [`loan::borrow`] checks quota
//! first, then stock, and only then moves the counters.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use library_engine::{BookRequest, Library, LibraryConfig, MemberRequest};
//!
//! let mut library = Library::new(LibraryConfig::new(2));
//! let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//!
//! let dune = BookRequest::new("Dune", "Frank Herbert");
//! library.add_book(&dune).unwrap();
//! let alice = library.register_member(MemberRequest::new("Alice"), today).unwrap();
//!
//! let alice = library.borrow(alice.id, &dune).unwrap();
//! assert_eq!(alice.available_book_amount, 1);
//! assert_eq!(library.find_book_by_info("Dune", "Frank Herbert").unwrap().amount, 0);
//! ```

pub mod book;
pub mod config;
pub mod error;
pub mod library;
pub mod loan;
pub mod member;
pub mod page;
pub mod validation;

// Re-export main types at crate root
pub use book::{count_titles, Book, BookRequest, BookTitleCount};
pub use config::LibraryConfig;
pub use error::{Error, ErrorKind};
pub use library::Library;
pub use loan::Loan;
pub use member::{Member, MemberRequest, NewMember};
pub use page::PageRequest;

/// Type aliases for clarity
pub type BookId = i64;
pub type MemberId = i64;
pub type LoanId = i64;
