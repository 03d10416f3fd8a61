//! SSH key resource.
//!
//! Unique responsibility: map a declared SSH key onto the VDS API.
//!
//! Keys are looked up by name first (first match in list order wins), then by
//! ID. Import takes the key name.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::vds_client::VdsClient;
use crate::vds_models::{CreateSshKeyRequest, SshKey};
use crate::vds_resource::{ManagedResource, ResourceError};

const KIND: &str = "SSH key";

/// Declared configuration of an SSH key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyConfig {
    /// Key name.
    pub name: String,
    /// Public key. Optional because the key can be imported by name.
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Persisted state of an SSH key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyState {
    /// Key ID assigned by the API.
    pub ssh_key_id: Option<String>,
    /// Key name.
    pub name: String,
    /// Public key.
    pub public_key: Option<String>,
    /// MD5 fingerprint.
    pub md5_fingerprint: Option<String>,
    /// SHA256 fingerprint.
    pub sha256_fingerprint: Option<String>,
}

impl SshKeyState {
    /// Key ID, if set and non-empty.
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.ssh_key_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Overwrite every attribute with the remote key.
    pub fn apply_remote(&mut self, key: &SshKey) {
        self.ssh_key_id = Some(key.ssh_key_id.clone());
        self.name.clone_from(&key.name);
        self.public_key = Some(key.public_key.clone());
        self.md5_fingerprint = Some(key.md5_fingerprint.clone());
        self.sha256_fingerprint = Some(key.sha256_fingerprint.clone());
    }
}

impl From<&SshKey> for SshKeyState {
    fn from(key: &SshKey) -> Self {
        let mut state = Self::default();
        state.apply_remote(key);
        state
    }
}

/// SSH key lifecycle against the VDS API.
pub struct SshKeyResource {
    client: Arc<VdsClient>,
}

impl SshKeyResource {
    /// Create a new SSH key resource.
    #[must_use]
    pub const fn new(client: Arc<VdsClient>) -> Self {
        Self { client }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<SshKey>, ResourceError> {
        let keys = self
            .client
            .list_ssh_keys()
            .await
            .map_err(|source| ResourceError::Client {
                kind: KIND,
                operation: "list",
                source,
            })?;

        Ok(keys.ssh_keys.into_iter().find(|k| k.name == name))
    }
}

#[async_trait]
impl ManagedResource for SshKeyResource {
    type Desired = SshKeyConfig;
    type State = SshKeyState;

    async fn create(&self, desired: SshKeyConfig) -> Result<SshKeyState, ResourceError> {
        let req = CreateSshKeyRequest {
            name: desired.name.clone(),
            public_key: desired.public_key.clone().unwrap_or_default(),
        };

        let key = self
            .client
            .create_ssh_key(&req)
            .await
            .map_err(|source| ResourceError::Api {
                kind: KIND,
                operation: "create",
                source,
            })?;

        tracing::trace!(ssh_key_id = %key.ssh_key_id, "created an SSH key");
        Ok(SshKeyState {
            ssh_key_id: Some(key.ssh_key_id),
            name: desired.name,
            public_key: desired.public_key,
            md5_fingerprint: Some(key.md5_fingerprint),
            sha256_fingerprint: Some(key.sha256_fingerprint),
        })
    }

    async fn read(&self, mut state: SshKeyState) -> Result<SshKeyState, ResourceError> {
        if !state.name.is_empty() {
            if let Some(key) = self.find_by_name(&state.name).await? {
                state.apply_remote(&key);
                return Ok(state);
            }
            tracing::debug!(name = %state.name, "no SSH key with this name, trying by ID");
        }

        let Some(id) = state.key_id() else {
            return Err(ResourceError::MissingId {
                kind: KIND,
                operation: "read",
            });
        };

        let key = self
            .client
            .get_ssh_key(id)
            .await
            .map_err(|source| ResourceError::Client {
                kind: KIND,
                operation: "read",
                source,
            })?;

        state.apply_remote(&key);
        Ok(state)
    }

    async fn update(
        &self,
        prior: SshKeyState,
        desired: SshKeyConfig,
    ) -> Result<SshKeyState, ResourceError> {
        Ok(SshKeyState {
            name: desired.name,
            public_key: desired.public_key,
            ..prior
        })
    }

    async fn delete(&self, state: SshKeyState) -> Result<(), ResourceError> {
        let Some(id) = state.key_id() else {
            return Err(ResourceError::MissingId {
                kind: KIND,
                operation: "delete",
            });
        };

        self.client
            .delete_ssh_key(id)
            .await
            .map_err(|source| ResourceError::Api {
                kind: KIND,
                operation: "delete",
                source,
            })
    }

    fn import(&self, name: &str) -> Result<SshKeyState, ResourceError> {
        Ok(SshKeyState {
            name: name.to_string(),
            ..SshKeyState::default()
        })
    }
}
