//! Request extractors that validate input before a handler runs.
//!
//! - [`ValidatedJson`] deserializes the body (unknown properties rejected by
//!   the DTO) and runs its `validator` rules.
//! - [`FilterQuery`] and [`WhereQuery`] parse the `filter` / `where` query
//!   parameters against an entity's field registry.
//!
//! All rejections are [`AppError`]s, so malformed input gets the same JSON
//! error body as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use ems_core::error::CoreError;
use ems_core::filter::{Filter, FilterField, Where};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;
use crate::query::{FilterParams, WhereParams};

/// JSON body that passed deserialization and validation.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value
            .validate()
            .map_err(|errors| CoreError::Validation(errors.to_string()))?;
        Ok(Self(value))
    }
}

/// Parsed `?filter=` parameter. Absent means the default filter.
#[derive(Debug)]
pub struct FilterQuery<F: FilterField>(pub Filter<F>);

impl<F, S> FromRequestParts<S> for FilterQuery<F>
where
    F: FilterField,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<FilterParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let filter = Filter::from_query(params.filter.as_deref()).map_err(CoreError::from)?;
        Ok(Self(filter))
    }
}

/// Parsed `?where=` parameter. Absent means "match all".
#[derive(Debug)]
pub struct WhereQuery<F: FilterField>(pub Where<F>);

impl<F, S> FromRequestParts<S> for WhereQuery<F>
where
    F: FilterField,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<WhereParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let where_clause =
            Where::from_query(params.where_clause.as_deref()).map_err(CoreError::from)?;
        Ok(Self(where_clause))
    }
}
