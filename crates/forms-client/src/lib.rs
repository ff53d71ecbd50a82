//! Signed HTTP client for the external forms API.
//!
//! [`FormsClient`] holds the connection settings; [`FormsClient::with_caller`]
//! binds it to one authenticated caller and returns a [`BoundClient`], the
//! only type that can issue requests. Failed calls surface as
//! [`RequestFailure`], which [`normalize`] maps onto
//! [`forms_core::NormalizedError`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod sign;
pub mod validation;

pub use client::{BoundClient, ClientConfig, FormsClient};
pub use error::{Error, FailureKind, RequestFailure, Result};
pub use normalize::normalize;
pub use sign::{Clock, SignedHeaders, SystemClock, sign};
pub use validation::parse_validation_errors;

#[cfg(test)]
mod testing;
