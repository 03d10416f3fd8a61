//! Managed resource vocabulary.
//!
//! The orchestration host drives every managed resource through the same
//! fixed capability interface; this module defines it together with the
//! error every lifecycle operation reports.

use async_trait::async_trait;
use thiserror::Error;

use crate::vds_codec::{ApiFailure, ClientError};
use crate::vds_models::ApiErrorBody;

/// Error from a resource lifecycle operation. Never retried.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The identifier needed by the operation is not set.
    #[error("{kind} ID is not set, cannot {operation}")]
    MissingId {
        /// Resource kind.
        kind: &'static str,
        /// Operation that needed the ID.
        operation: &'static str,
    },
    /// The import identifier could not be parsed.
    #[error("could not parse import ID {raw:?}: {source}")]
    InvalidImportId {
        /// The identifier as given.
        raw: String,
        /// Parse error.
        source: std::num::ParseIntError,
    },
    /// A read call failed.
    #[error("unable to {operation} {kind}: {source}")]
    Client {
        /// Resource kind.
        kind: &'static str,
        /// Operation that failed.
        operation: &'static str,
        /// Underlying failure.
        source: ClientError,
    },
    /// A mutating call failed. Carries the API error body when decodable.
    #[error("unable to {operation} {kind}: {source}")]
    Api {
        /// Resource kind.
        kind: &'static str,
        /// Operation that failed.
        operation: &'static str,
        /// Underlying failure with its structured detail.
        source: ApiFailure<ApiErrorBody>,
    },
}

impl ResourceError {
    /// Structured error body returned by the API, if any.
    #[must_use]
    pub const fn api_detail(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::Api { source, .. } => source.detail.as_ref(),
            Self::MissingId { .. } | Self::InvalidImportId { .. } | Self::Client { .. } => None,
        }
    }
}

/// Lifecycle operations invoked by the orchestration host for one resource kind.
///
/// Each call issues at most two sequential requests.
#[async_trait]
pub trait ManagedResource: Send + Sync {
    /// Declared configuration of the resource.
    type Desired: Send + 'static;
    /// Persisted local state of the resource.
    type State: Send + 'static;

    /// Create the remote entity and return the resulting state.
    async fn create(&self, desired: Self::Desired) -> Result<Self::State, ResourceError>;

    /// Rebuild the state from the remote entity.
    async fn read(&self, state: Self::State) -> Result<Self::State, ResourceError>;

    /// Apply a changed configuration.
    async fn update(
        &self,
        prior: Self::State,
        desired: Self::Desired,
    ) -> Result<Self::State, ResourceError>;

    /// Delete the remote entity.
    async fn delete(&self, state: Self::State) -> Result<(), ResourceError>;

    /// Build a state holding only the identifier from an external import ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID cannot be interpreted.
    fn import(&self, id: &str) -> Result<Self::State, ResourceError>;
}
