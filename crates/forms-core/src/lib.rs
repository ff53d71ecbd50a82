//! Core types shared by the forms API client and the web front end.
//!
//! This crate is deliberately free of HTTP dependencies. It names the caller
//! on whose behalf a request is made, the inbound form input, and the small
//! error taxonomy every upstream failure is normalized into.

pub mod error;
pub mod fields;
pub mod form;
pub mod identity;

pub use error::{Error, NormalizedError, Result};
pub use fields::FieldErrors;
pub use form::{FormInput, FormStatus};
pub use identity::CallerId;
