//! # Weft kernel crate.
//!
//! This crate provides the per-request state of the weft host: the
//! [`RequestExchange`] and the response header mutation plugins rely on.

#![deny(clippy::unwrap_used, clippy::dbg_macro, clippy::unimplemented, clippy::todo, clippy::missing_safety_doc)]
#![warn(
    clippy::missing_errors_doc,
    clippy::indexing_slicing,
    clippy::inline_always,
    clippy::fn_params_excessive_bools,
    missing_debug_implementations
)]
/// a boxed body
pub mod body;
/// exchange errors
pub mod error;
/// the in-flight request/response pair
pub mod exchange;
/// extensions for request
pub mod extension;

pub use body::WfBody;
pub use error::ExchangeError;
pub use exchange::{ExchangeState, RequestExchange};
use hyper::{Request, Response};

pub type BoxResult<T> = Result<T, BoxError>;
/// A boxed error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Alias for a request with a boxed body.
pub type WfRequest = Request<WfBody>;
/// Alias for a response with a boxed body.
pub type WfResponse = Response<WfBody>;

/// Set a response header of the exchange, replacing every previous value of the same (case-insensitive) key.
///
/// # Errors
/// [`ExchangeError::FinalizedResponse`] if the response was already finalized, or an error if the key or value
/// is not a valid header name or value.
pub fn set_header(exchange: &mut RequestExchange, key: &str, value: &str) -> Result<(), ExchangeError> {
    exchange.set_header(key, value)
}
