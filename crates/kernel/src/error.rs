use std::fmt;

use hyper::header::{InvalidHeaderName, InvalidHeaderValue};

/// Errors raised when mutating a [`RequestExchange`](crate::RequestExchange).
#[derive(Debug)]
pub enum ExchangeError {
    /// The response was already finalized and handed to the wire.
    FinalizedResponse,
    InvalidHeaderName(InvalidHeaderName),
    InvalidHeaderValue(InvalidHeaderValue),
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::FinalizedResponse => write!(f, "[Wf.Exchange] response already finalized"),
            ExchangeError::InvalidHeaderName(e) => write!(f, "[Wf.Exchange] invalid header name: {e}"),
            ExchangeError::InvalidHeaderValue(e) => write!(f, "[Wf.Exchange] invalid header value: {e}"),
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExchangeError::FinalizedResponse => None,
            ExchangeError::InvalidHeaderName(e) => Some(e),
            ExchangeError::InvalidHeaderValue(e) => Some(e),
        }
    }
}

impl From<InvalidHeaderName> for ExchangeError {
    fn from(value: InvalidHeaderName) -> Self {
        ExchangeError::InvalidHeaderName(value)
    }
}

impl From<InvalidHeaderValue> for ExchangeError {
    fn from(value: InvalidHeaderValue) -> Self {
        ExchangeError::InvalidHeaderValue(value)
    }
}
