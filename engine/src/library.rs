//! Library - the in-memory inventory.
//!
//! The Library holds books, members and the loans joining them, and exposes
//! every book and member operation against that state. It performs no IO:
//! the current date is passed in by the caller.

use crate::{
    book::count_titles, error::Result, loan, Book, BookId, BookRequest, BookTitleCount, Error,
    LibraryConfig, Loan, LoanId, Member, MemberId, MemberRequest, NewMember, PageRequest,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Books, members and active loans.
#[derive(Debug, Clone, Default)]
pub struct Library {
    config: LibraryConfig,
    books: BTreeMap<BookId, Book>,
    members: BTreeMap<MemberId, Member>,
    /// Active loans in the order they were made
    loans: Vec<Loan>,
    last_book_id: BookId,
    last_member_id: MemberId,
    last_loan_id: LoanId,
}

impl Library {
    /// Create an empty library.
    pub fn new(config: LibraryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Get the lending settings.
    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Active loans, oldest first.
    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Number of copies of a book currently out on loan.
    pub fn copies_on_loan(&self, book_id: BookId) -> usize {
        self.loans.iter().filter(|l| l.book_id == book_id).count()
    }

    /// Books a member currently holds, one entry per loan.
    pub fn borrowed_books(&self, member_id: MemberId) -> Vec<&Book> {
        self.loans
            .iter()
            .filter(|l| l.member_id == member_id)
            .filter_map(|l| self.books.get(&l.book_id))
            .collect()
    }

    // ------------------------------------------------------------------
    // Books
    // ------------------------------------------------------------------

    /// Register one copy of a book.
    ///
    /// If a book with the same title and author exists its amount goes up by
    /// one and its id is kept; otherwise a new book with one copy is created.
    pub fn add_book(&mut self, request: &BookRequest) -> Result<Book> {
        request.validate()?;

        if let Some(book) = self
            .books
            .values_mut()
            .find(|b| b.matches(&request.title, &request.author))
        {
            book.amount += 1;
            return Ok(book.clone());
        }

        self.last_book_id += 1;
        let book = Book {
            id: self.last_book_id,
            title: request.title.clone(),
            author: request.author.clone(),
            amount: 1,
        };
        self.books.insert(book.id, book.clone());
        Ok(book)
    }

    /// Get a book by id.
    pub fn find_book(&self, id: BookId) -> Result<&Book> {
        self.books.get(&id).ok_or(Error::BookNotFound(id))
    }

    /// Get a book by its title and author.
    pub fn find_book_by_info(&self, title: &str, author: &str) -> Result<&Book> {
        self.books
            .values()
            .find(|b| b.matches(title, author))
            .ok_or_else(|| not_found_by_info(title, author))
    }

    /// Rename a book. The amount is kept.
    pub fn update_book(&mut self, id: BookId, request: &BookRequest) -> Result<Book> {
        request.validate()?;

        if !self.books.contains_key(&id) {
            return Err(Error::BookNotFound(id));
        }
        if self
            .books
            .values()
            .any(|b| b.id != id && b.matches(&request.title, &request.author))
        {
            return Err(Error::DuplicateBook {
                title: request.title.clone(),
                author: request.author.clone(),
            });
        }

        let book = self.books.get_mut(&id).ok_or(Error::BookNotFound(id))?;
        book.title = request.title.clone();
        book.author = request.author.clone();
        Ok(book.clone())
    }

    /// Delete a book that nobody is holding.
    pub fn delete_book(&mut self, id: BookId) -> Result<()> {
        if !self.books.contains_key(&id) {
            return Err(Error::BookNotFound(id));
        }
        if self.copies_on_loan(id) > 0 {
            return Err(Error::BookBorrowed(id));
        }
        self.books.remove(&id);
        Ok(())
    }

    /// List books ordered by id.
    pub fn books(&self, page: PageRequest) -> Vec<Book> {
        let all: Vec<&Book> = self.books.values().collect();
        page.slice(&all).iter().map(|b| (*b).clone()).collect()
    }

    /// Distinct titles of borrowed books, alphabetically.
    pub fn borrowed_titles(&self, page: PageRequest) -> Vec<String> {
        let titles: BTreeSet<&str> = self
            .loans
            .iter()
            .filter_map(|l| self.books.get(&l.book_id))
            .map(|b| b.title.as_str())
            .collect();
        let titles: Vec<&str> = titles.into_iter().collect();
        page.slice(&titles).iter().map(|t| t.to_string()).collect()
    }

    /// Borrowed rows of one page of loans, counted per title.
    ///
    /// Counting happens within the requested page only, so a title whose
    /// loans straddle a page boundary shows up on both pages with partial
    /// counts.
    pub fn borrowed_title_counts(&self, page: PageRequest) -> Vec<BookTitleCount> {
        count_titles(
            page.slice(&self.loans)
                .iter()
                .filter_map(|l| self.books.get(&l.book_id)),
        )
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    /// Register a member with the configured quota.
    pub fn register_member(&mut self, request: MemberRequest, today: NaiveDate) -> Result<Member> {
        request.validate()?;

        self.last_member_id += 1;
        let member = NewMember::register(request, today, &self.config).with_id(self.last_member_id);
        self.members.insert(member.id, member.clone());
        Ok(member)
    }

    /// Get a member by id.
    pub fn find_member(&self, id: MemberId) -> Result<&Member> {
        self.members.get(&id).ok_or(Error::MemberNotFound(id))
    }

    /// List members ordered by id.
    pub fn members(&self, page: PageRequest) -> Vec<Member> {
        let all: Vec<&Member> = self.members.values().collect();
        page.slice(&all).iter().map(|m| (*m).clone()).collect()
    }

    /// Rename a member. Membership date and quota are kept.
    pub fn update_member(&mut self, id: MemberId, request: MemberRequest) -> Result<Member> {
        request.validate()?;

        let member = self.members.get_mut(&id).ok_or(Error::MemberNotFound(id))?;
        member.name = request.name;
        Ok(member.clone())
    }

    /// Delete a member who holds no books.
    pub fn delete_member(&mut self, id: MemberId) -> Result<()> {
        if !self.members.contains_key(&id) {
            return Err(Error::MemberNotFound(id));
        }
        if self.loans.iter().any(|l| l.member_id == id) {
            return Err(Error::MemberHasLoans(id));
        }
        self.members.remove(&id);
        Ok(())
    }

    /// Lend the book named by `request` to a member.
    ///
    /// Order of checks: member exists, member has quota, book exists, book
    /// has a copy. Nothing changes unless all of them pass.
    pub fn borrow(&mut self, member_id: MemberId, request: &BookRequest) -> Result<Member> {
        request.validate()?;

        let member = self
            .members
            .get_mut(&member_id)
            .ok_or(Error::MemberNotFound(member_id))?;
        loan::check_quota(member)?;

        let book = find_by_info_mut(&mut self.books, &request.title, &request.author)?;
        loan::borrow(member, book)?;

        self.last_loan_id += 1;
        self.loans.push(Loan {
            id: self.last_loan_id,
            member_id,
            book_id: book.id,
        });

        Ok(member.clone())
    }

    /// Take back the book named by `request` from a member.
    ///
    /// Removes the member's oldest loan of that book.
    pub fn return_book(&mut self, member_id: MemberId, request: &BookRequest) -> Result<Member> {
        request.validate()?;

        let member = self
            .members
            .get_mut(&member_id)
            .ok_or(Error::MemberNotFound(member_id))?;
        let book = find_by_info_mut(&mut self.books, &request.title, &request.author)?;

        let position = self
            .loans
            .iter()
            .position(|l| l.links(member_id, book.id))
            .ok_or(Error::BookNotHeld {
                member_id,
                book_id: book.id,
            })?;
        self.loans.remove(position);
        loan::give_back(member, book);

        Ok(member.clone())
    }

    /// Books on loan to members with the given name, in loan order.
    pub fn books_borrowed_by(&self, name: &str, page: PageRequest) -> Result<Vec<Book>> {
        crate::validation::validate_member_name(name)?;

        let rows: Vec<&Book> = self
            .loans
            .iter()
            .filter(|l| {
                self.members
                    .get(&l.member_id)
                    .is_some_and(|m| m.name == name)
            })
            .filter_map(|l| self.books.get(&l.book_id))
            .collect();
        Ok(page.slice(&rows).iter().map(|b| (*b).clone()).collect())
    }
}

fn find_by_info_mut<'a>(
    books: &'a mut BTreeMap<BookId, Book>,
    title: &str,
    author: &str,
) -> Result<&'a mut Book> {
    books
        .values_mut()
        .find(|b| b.matches(title, author))
        .ok_or_else(|| not_found_by_info(title, author))
}

fn not_found_by_info(title: &str, author: &str) -> Error {
    Error::BookNotFoundByInfo {
        title: title.to_string(),
        author: author.to_string(),
    }
}
