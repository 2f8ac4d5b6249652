//! Request handlers for book and member operations.

mod books;
mod members;

pub use books::*;
pub use members::*;
