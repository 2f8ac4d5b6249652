//! Field predicates applied to incoming requests.
//!
//! These run before any lookup or mutation, so a malformed title, author or
//! name never reaches the lending rules.

use crate::{error::Result, Error};
use regex::Regex;
use std::sync::LazyLock;

static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z].{2,}$").expect("title pattern is valid"));

static AUTHOR_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]* [A-Z][a-z]*$").expect("author pattern is valid"));

/// A title starts with an uppercase ASCII letter followed by at least two
/// more characters.
pub fn is_valid_title(title: &str) -> bool {
    TITLE_PATTERN.is_match(title)
}

/// An author name is exactly two capitalized words separated by one space,
/// e.g. `Frank Herbert`.
pub fn is_valid_author_name(name: &str) -> bool {
    AUTHOR_NAME_PATTERN.is_match(name)
}

/// A member name must contain at least one non-whitespace character.
pub fn is_valid_member_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Validate a book title.
pub fn validate_title(title: &str) -> Result<()> {
    if is_valid_title(title) {
        Ok(())
    } else {
        Err(Error::InvalidTitle(title.to_string()))
    }
}

/// Validate an author name.
pub fn validate_author_name(name: &str) -> Result<()> {
    if is_valid_author_name(name) {
        Ok(())
    } else {
        Err(Error::InvalidAuthorName(name.to_string()))
    }
}

/// Validate a member name.
pub fn validate_member_name(name: &str) -> Result<()> {
    if is_valid_member_name(name) {
        Ok(())
    } else {
        Err(Error::BlankMemberName)
    }
}

/// Surrogate ids are positive.
pub fn validate_id(id: i64) -> Result<i64> {
    if id > 0 {
        Ok(id)
    } else {
        Err(Error::InvalidId(id))
    }
}
