//! Error types for the dashboard data layer.
//!
//! # Design
//! Three layers, three enums. `ApiError` is whatever the HTTP round-trip
//! produced and is forwarded unchanged by the resource client. `StoreError`
//! wraps it with the step of a store action that failed, plus the one local
//! precondition the store checks itself. `ValidationError` belongs to form
//! preparation and never reaches a store.

use thiserror::Error;

use crate::resource::EntityId;

/// Errors produced by the transport and the resource client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server returned 404 for the requested record.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors returned by store actions.
///
/// The message of the error is also recorded in the store's error slot, so
/// callers may ignore the `Result` and render `Store::error` instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No held entity has this id; no request was sent.
    #[error("{kind} {id} not found")]
    EntityNotFound { kind: &'static str, id: EntityId },

    /// Listing the collection failed; the previous collection is kept.
    #[error("failed to load: {0}")]
    Fetch(#[source] ApiError),

    /// The create/update/delete request itself failed.
    #[error("write failed: {0}")]
    Write(#[source] ApiError),

    /// The write succeeded but reloading the collection afterwards failed.
    #[error("saved, but reloading failed: {0}")]
    Refetch(#[source] ApiError),
}

/// Form input rejected before any store action runs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("field `{0}` is required")]
    MissingField(&'static str),

    #[error("sale price {sale} cannot be lower than purchase price {purchase}")]
    SalePriceBelowPurchase { sale: f64, purchase: f64 },

    #[error("the \"Insumos\" category does not exist")]
    SuppliesCategoryMissing,

    #[error("unknown category {0}")]
    UnknownCategory(EntityId),

    #[error("unknown measure unit {0}")]
    UnknownUnit(EntityId),

    #[error("unknown supply {0}")]
    UnknownSupply(EntityId),

    #[error("supply {0} is not meant for elaboration")]
    NotAnIngredient(EntityId),
}
