//! HTTP route definitions.

mod books;
mod health;
mod members;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(books::routes())
        .merge(members::routes())
}
