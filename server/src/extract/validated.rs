//! Validating extractors.
//!
//! Path ids, page parameters and JSON bodies are checked here, so handlers
//! only ever see well-formed input.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use library_engine::{validation, BookRequest, MemberRequest, PageRequest};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::AppError;

/// Request bodies that can check their own fields.
pub trait Validate {
    fn validate(&self) -> library_engine::error::Result<()>;
}

impl Validate for BookRequest {
    fn validate(&self) -> library_engine::error::Result<()> {
        BookRequest::validate(self)
    }
}

impl Validate for MemberRequest {
    fn validate(&self) -> library_engine::error::Result<()> {
        MemberRequest::validate(self)
    }
}

/// A positive surrogate id taken from the path.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub i64);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(PathId(validation::validate_id(id)?))
    }
}

/// Query parameters for paged listings.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Zero-based page number
    pub page: Option<i64>,
    /// Items per page
    pub size: Option<i64>,
}

/// A checked page request taken from the query string.
#[derive(Debug, Clone, Copy)]
pub struct Paging(pub PageRequest);

impl<S> FromRequestParts<S> for Paging
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(Paging(PageRequest::new(query.page, query.size)?))
    }
}

/// A JSON body that passed [`Validate`].
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        value.validate()?;
        Ok(ValidJson(value))
    }
}
