//! Request extractors that validate input before it reaches a handler.

mod validated;

pub use validated::*;
