//! Database module for PostgreSQL persistence.

mod books;
mod loans;
mod members;
mod pool;

pub use books::*;
pub use loans::*;
pub use members::*;
pub use pool::*;
