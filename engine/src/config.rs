//! Lending policy settings.

/// Settings that shape how members are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Loan quota given to every new member
    pub default_book_quota: i32,
}

impl LibraryConfig {
    /// Quota used when nothing else is configured.
    pub const DEFAULT_BOOK_QUOTA: i32 = 10;

    pub fn new(default_book_quota: i32) -> Self {
        Self { default_book_quota }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BOOK_QUOTA)
    }
}
