//! Response classification.
//!
//! Most 115 endpoints answer HTTP 200 even when the call failed and put the
//! real outcome in the body. [`classify`] is the single place that turns a
//! finished exchange into either a validated payload or an error, checking
//! in order: transport, HTTP status, body shape, body state. A status field
//! that does not decode is an [`Error::Decode`], not an API failure.

use crate::error::{ApiError, BoxError, Error};
use crate::scalar::DecodeError;

/// Outcome reported by a response body's embedded status fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Ok,
    Failed { code: i64, message: String },
}

/// Raw responses that carry a status indicator.
pub trait StatusIndicator {
    fn status(&self) -> Result<ApiStatus, DecodeError>;
}

/// A completed HTTP exchange whose body has been decoded (or failed to).
#[derive(Debug)]
pub struct Exchange<R> {
    /// HTTP status code.
    pub status: u16,
    /// The decoded body, or why it could not be decoded.
    pub body: Result<R, BoxError>,
}

impl<R> Exchange<R> {
    pub fn new(status: u16, body: Result<R, BoxError>) -> Self {
        Self { status, body }
    }
}

/// Classify an exchange. A transport error wins over everything else and
/// the body state is only consulted once the status is a success.
pub fn classify<R: StatusIndicator>(exchange: Result<Exchange<R>, BoxError>) -> Result<R, Error> {
    let exchange = exchange.map_err(ApiError::Transport)?;

    if !(200..300).contains(&exchange.status) {
        return Err(ApiError::HttpStatus {
            status: exchange.status,
        }
        .into());
    }

    let body = exchange.body.map_err(ApiError::Transport)?;
    match body.status()? {
        ApiStatus::Ok => Ok(body),
        ApiStatus::Failed { code, message } => Err(ApiError::ApiState { code, message }.into()),
    }
}
