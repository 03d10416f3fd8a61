//! Typed request/response codec.
//!
//! Unique responsibility: marshal typed request bodies to JSON and unmarshal
//! typed success or error bodies, for any entity shape.
//!
//! Mutating calls (POST/DELETE) use a dual-channel failure: the caller always
//! gets the underlying cause, and, when the failure body decodes, the
//! service's structured error description alongside it.

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::vds_transport::{HttpMethod, TransportError, VdsTransport};

/// Error from a typed call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection, non-2xx status, disabled verb).
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Request body could not be serialized.
    #[error("json encode error: {0}")]
    Encode(#[source] serde_json::Error),
    /// A successful response body did not match the expected shape.
    #[error("json decode error: {source}")]
    Decode {
        /// The JSON parsing error.
        source: serde_json::Error,
        /// The response body.
        body: String,
    },
}

/// Failure of a mutating call.
///
/// `cause` is always set. `detail` holds the decoded error body when the
/// server answered with one that matches `E`.
#[derive(Debug)]
pub struct ApiFailure<E> {
    /// Underlying failure.
    pub cause: ClientError,
    /// Structured error description returned by the service, if decodable.
    pub detail: Option<E>,
}

impl<E> From<ClientError> for ApiFailure<E> {
    fn from(cause: ClientError) -> Self {
        Self {
            cause,
            detail: None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for ApiFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.cause),
            None => write!(f, "{}", self.cause),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ApiFailure<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// GET `path` and decode the body into `R`.
///
/// `params` are pre-encoded `key=value` fragments; they are joined with `&`.
///
/// # Errors
///
/// Returns [`ClientError::Transport`] if the call fails and
/// [`ClientError::Decode`] if the body does not match `R`.
pub async fn fetch_typed<R: DeserializeOwned>(
    transport: &VdsTransport,
    path: &str,
    params: &[&str],
) -> Result<R, ClientError> {
    let raw = transport
        .execute(HttpMethod::Get, &with_query(path, params), None)
        .await?;
    decode(raw.body)
}

/// POST `body` as JSON to `path` and decode the result into `R`.
///
/// # Errors
///
/// On a failed call, returns the cause together with the failure body decoded
/// into `E` when possible.
pub async fn submit_typed<B, R, E>(
    transport: &VdsTransport,
    path: &str,
    body: &B,
) -> Result<R, ApiFailure<E>>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
    E: DeserializeOwned,
{
    let payload = serde_json::to_vec(body).map_err(ClientError::Encode)?;
    let raw = transport
        .execute(HttpMethod::Post, path, Some(payload))
        .await
        .map_err(with_detail)?;
    Ok(decode(raw.body)?)
}

/// DELETE `path` and decode the result into `R`.
///
/// # Errors
///
/// Same dual-channel contract as [`submit_typed`].
pub async fn remove_typed<R, E>(transport: &VdsTransport, path: &str) -> Result<R, ApiFailure<E>>
where
    R: DeserializeOwned,
    E: DeserializeOwned,
{
    let raw = transport
        .execute(HttpMethod::Delete, path, None)
        .await
        .map_err(with_detail)?;
    Ok(decode(raw.body)?)
}

/// DELETE `path`, ignoring whatever a successful response carries.
///
/// # Errors
///
/// Same dual-channel contract as [`submit_typed`].
pub async fn remove_unit<E: DeserializeOwned>(
    transport: &VdsTransport,
    path: &str,
) -> Result<(), ApiFailure<E>> {
    transport
        .execute(HttpMethod::Delete, path, None)
        .await
        .map_err(with_detail)?;
    Ok(())
}

/// Attach the decoded failure body, best-effort.
fn with_detail<E: DeserializeOwned>(err: TransportError) -> ApiFailure<E> {
    let detail = err.body().and_then(|b| serde_json::from_str::<E>(b).ok());
    if detail.is_none() && err.body().is_some_and(|b| !b.trim().is_empty()) {
        tracing::debug!("failure body did not match the error shape");
    }
    ApiFailure {
        cause: ClientError::Transport(err),
        detail,
    }
}

fn decode<R: DeserializeOwned>(body: String) -> Result<R, ClientError> {
    serde_json::from_str(&body).map_err(|source| ClientError::Decode { source, body })
}

fn with_query(path: &str, params: &[&str]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    format!("{path}?{}", params.join("&"))
}
