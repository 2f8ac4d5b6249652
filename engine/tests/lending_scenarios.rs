//! Lending scenarios for library-engine
//!
//! These tests walk through whole borrow/return stories against the public API.

use chrono::NaiveDate;
use library_engine::{
    BookRequest, BookTitleCount, Error, ErrorKind, Library, LibraryConfig, MemberRequest,
    PageRequest,
};
use std::sync::{Arc, Mutex};
use std::thread;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
}

fn dune() -> BookRequest {
    BookRequest::new("Dune", "Frank Herbert")
}

// ============================================================================
// Quota and stock
// ============================================================================

#[test]
fn single_quota_single_copy() {
    let mut library = Library::new(LibraryConfig::new(1));
    library.add_book(&dune()).unwrap();
    library.add_book(&BookRequest::new("Emma", "Jane Austen")).unwrap();
    let member = library
        .register_member(MemberRequest::new("Alice"), today())
        .unwrap();

    let member = library.borrow(member.id, &dune()).unwrap();
    assert_eq!(member.available_book_amount, 0);
    assert_eq!(
        library.find_book_by_info("Dune", "Frank Herbert").unwrap().amount,
        0
    );

    let err = library
        .borrow(member.id, &BookRequest::new("Emma", "Jane Austen"))
        .unwrap_err();
    assert_eq!(err, Error::QuotaExhausted(member.id));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        library.find_book_by_info("Emma", "Jane Austen").unwrap().amount,
        1
    );
}

#[test]
fn unavailable_book_regardless_of_quota() {
    let mut library = Library::new(LibraryConfig::new(10));
    let book = library.add_book(&dune()).unwrap();
    let alice = library
        .register_member(MemberRequest::new("Alice"), today())
        .unwrap();
    let bob = library
        .register_member(MemberRequest::new("Bob"), today())
        .unwrap();

    library.borrow(alice.id, &dune()).unwrap();

    let err = library.borrow(bob.id, &dune()).unwrap_err();
    assert_eq!(err, Error::NoCopiesAvailable(book.id));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(library.find_member(bob.id).unwrap().available_book_amount, 10);
    assert!(library.borrowed_books(bob.id).is_empty());
}

#[test]
fn return_of_unheld_book_is_not_found() {
    let mut library = Library::new(LibraryConfig::new(3));
    library.add_book(&dune()).unwrap();
    let alice = library
        .register_member(MemberRequest::new("Alice"), today())
        .unwrap();
    let bob = library
        .register_member(MemberRequest::new("Bob"), today())
        .unwrap();
    library.borrow(alice.id, &dune()).unwrap();

    let err = library.return_book(bob.id, &dune()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(library.loans().len(), 1);
    assert_eq!(library.find_member(bob.id).unwrap().available_book_amount, 3);
}

#[test]
fn return_of_unknown_book_is_not_found() {
    let mut library = Library::new(LibraryConfig::new(3));
    let alice = library
        .register_member(MemberRequest::new("Alice"), today())
        .unwrap();

    let err = library
        .return_book(alice.id, &BookRequest::new("Emma", "Jane Austen"))
        .unwrap_err();
    assert!(matches!(err, Error::BookNotFoundByInfo { .. }));
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn borrowed_books_report() {
    let mut library = Library::new(LibraryConfig::new(10));
    for _ in 0..3 {
        library.add_book(&BookRequest::new("Foo", "Ann Lee")).unwrap();
    }
    for _ in 0..2 {
        library.add_book(&BookRequest::new("Bar", "Bob Ray")).unwrap();
    }

    let names = ["Alice", "Bob", "Carol", "Dan", "Eve"];
    let requests = [
        BookRequest::new("Foo", "Ann Lee"),
        BookRequest::new("Foo", "Ann Lee"),
        BookRequest::new("Foo", "Ann Lee"),
        BookRequest::new("Bar", "Bob Ray"),
        BookRequest::new("Bar", "Bob Ray"),
    ];
    for (name, request) in names.iter().zip(requests.iter()) {
        let member = library
            .register_member(MemberRequest::new(*name), today())
            .unwrap();
        library.borrow(member.id, request).unwrap();
    }

    let mut counts = library.borrowed_title_counts(PageRequest::default());
    counts.sort_by(|a, b| b.amount.cmp(&a.amount));
    assert_eq!(
        counts,
        vec![
            BookTitleCount {
                title: "Foo".into(),
                amount: 3
            },
            BookTitleCount {
                title: "Bar".into(),
                amount: 2
            },
        ]
    );
    assert_eq!(
        library.borrowed_titles(PageRequest::default()),
        vec!["Bar".to_string(), "Foo".to_string()]
    );
}

// ============================================================================
// Shared access
// ============================================================================

#[test]
fn mutex_guarded_library_lends_the_last_copy_once() {
    // Calls are serialized by the mutex; this checks the stock bookkeeping only.
    let mut library = Library::new(LibraryConfig::new(5));
    let book = library.add_book(&dune()).unwrap();
    let member_ids: Vec<_> = (0..16)
        .map(|i| {
            library
                .register_member(MemberRequest::new(format!("Member {}", i)), today())
                .unwrap()
                .id
        })
        .collect();

    let library = Arc::new(Mutex::new(library));
    let handles: Vec<_> = member_ids
        .into_iter()
        .map(|id| {
            let library = Arc::clone(&library);
            thread::spawn(move || library.lock().unwrap().borrow(id, &dune()).is_ok())
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    let library = library.lock().unwrap();
    assert_eq!(winners, 1);
    assert_eq!(library.find_book(book.id).unwrap().amount, 0);
    assert_eq!(library.copies_on_loan(book.id), 1);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn full_lifecycle() {
    let mut library = Library::new(LibraryConfig::default());
    let book = library.add_book(&dune()).unwrap();
    let member = library
        .register_member(MemberRequest::new("Alice"), today())
        .unwrap();
    assert_eq!(
        member.available_book_amount,
        LibraryConfig::DEFAULT_BOOK_QUOTA
    );

    library.borrow(member.id, &dune()).unwrap();
    assert_eq!(
        library
            .books_borrowed_by("Alice", PageRequest::default())
            .unwrap()
            .len(),
        1
    );
    assert!(library.delete_member(member.id).is_err());
    assert!(library.delete_book(book.id).is_err());

    library.return_book(member.id, &dune()).unwrap();
    library.delete_member(member.id).unwrap();
    library.delete_book(book.id).unwrap();

    assert!(library.books(PageRequest::default()).is_empty());
    assert!(library.members(PageRequest::default()).is_empty());
}
