//! Book records and the borrowed-title report.

use crate::{error::Result, validation, BookId};
use serde::{Deserialize, Serialize};

/// A book title held by the library.
///
/// `amount` counts the copies currently on the shelf: it is decremented when a
/// copy is borrowed and incremented when it is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Surrogate identifier
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Copies available for loan, never negative
    pub amount: i32,
}

impl Book {
    /// Whether this book carries the given natural key.
    pub fn matches(&self, title: &str, author: &str) -> bool {
        self.title == title && self.author == author
    }

    /// Whether at least one copy can be lent out.
    pub fn is_available(&self) -> bool {
        self.amount > 0
    }
}

/// Client-supplied book identity: used to register copies, to update a book,
/// and to name the book in borrow/return requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

impl BookRequest {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// Check the title and author predicates.
    pub fn validate(&self) -> Result<()> {
        validation::validate_title(&self.title)?;
        validation::validate_author_name(&self.author)
    }
}

/// One line of the borrowed-books report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTitleCount {
    pub title: String,
    /// Number of borrowed rows carrying this title
    pub amount: i64,
}

/// Group borrowed book rows by title and count them.
///
/// Rows are grouped by title only, so two authors sharing a title are counted
/// together. Titles appear in the order they are first seen.
pub fn count_titles<'a, I>(books: I) -> Vec<BookTitleCount>
where
    I: IntoIterator<Item = &'a Book>,
{
    let mut counts: Vec<BookTitleCount> = Vec::new();
    for book in books {
        match counts.iter_mut().find(|c| c.title == book.title) {
            Some(count) => count.amount += 1,
            None => counts.push(BookTitleCount {
                title: book.title.clone(),
                amount: 1,
            }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn book(id: BookId, title: &str, author: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            amount: 1,
        }
    }

    #[test]
    fn matches_natural_key() {
        let dune = book(1, "Dune", "Frank Herbert");
        assert!(dune.matches("Dune", "Frank Herbert"));
        assert!(!dune.matches("Dune", "Brian Herbert"));
        assert!(!dune.matches("dune", "Frank Herbert"));
    }

    #[test]
    fn request_validation() {
        assert!(BookRequest::new("Dune", "Frank Herbert").validate().is_ok());
        assert!(matches!(
            BookRequest::new("du", "Frank Herbert").validate(),
            Err(Error::InvalidTitle(_))
        ));
        assert!(matches!(
            BookRequest::new("Dune", "frank").validate(),
            Err(Error::InvalidAuthorName(_))
        ));
    }

    #[test]
    fn missing_request_fields_default_to_empty() {
        let request: BookRequest = serde_json::from_str(r#"{"title": "Dune"}"#).unwrap();
        assert_eq!(request.author, "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn count_titles_groups_by_title() {
        let rows = vec![
            book(1, "Foo", "Ann Lee"),
            book(2, "Bar", "Bob Ray"),
            book(1, "Foo", "Ann Lee"),
            book(3, "Foo", "Other Author"),
            book(2, "Bar", "Bob Ray"),
        ];

        let counts = count_titles(&rows);
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
    }

    #[test]
    fn count_titles_empty() {
        assert!(count_titles(&Vec::<Book>::new()).is_empty());
    }

    #[test]
    fn book_serializes_camel_case() {
        let json = serde_json::to_value(book(4, "Dune", "Frank Herbert")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 4, "title": "Dune", "author": "Frank Herbert", "amount": 1})
        );
    }
}
