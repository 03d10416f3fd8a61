//! VDS provider surface.
//!
//! High-level entry point used by the orchestration host:
//! - `configure()`: resolve credentials and build the shared client
//! - `vps()` / `ssh_keys()`: managed resources
//! - `datacenter_by_code()`, `os_by_code()` and the list lookups: read-only
//!   views that let configs refer to entities by derived code
//!
//! The token comes from the provider configuration, or from `VDS_API_TOKEN`
//! when the configuration leaves it empty.

use std::{env, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vds_client::VdsClient;
use crate::vds_codec::ClientError;
use crate::vds_codes::{country_name, datacenter_code, datacenter_country_code, os_code};
use crate::vds_models::{Datacenter, OperatingSystem};
use crate::vds_ssh_resource::{SshKeyResource, SshKeyState};
use crate::vds_transport::{TOKEN_ENV, TransportError, VdsClientConfig};
use crate::vds_vps_resource::{VpsResource, VpsState};

/// Provider configuration as declared by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API token. Falls back to `VDS_API_TOKEN` when absent or empty.
    #[serde(default)]
    pub token: Option<String>,
    /// Endpoint override.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ProviderConfig {
    /// Resolve the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingToken`] if neither the configuration
    /// nor the environment provides a token.
    pub fn resolve(&self) -> Result<VdsClientConfig, ProviderError> {
        let token = self
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty()))
            .ok_or(ProviderError::MissingToken)?;

        Ok(VdsClientConfig::new(token, self.endpoint.clone()))
    }
}

/// Error while configuring the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No token in the configuration nor in the environment.
    #[error("missing API token: set VDS_API_TOKEN or provide a token in the provider configuration")]
    MissingToken,
    /// HTTP client could not be built.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Error from a read-only lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The API call failed.
    #[error("unable to read {what}: {source}")]
    Client {
        /// What was being read.
        what: &'static str,
        /// Underlying failure.
        source: ClientError,
    },
    /// No entity has the requested code.
    #[error("{what} with code '{code}' not found")]
    NotFound {
        /// What was being looked up.
        what: &'static str,
        /// Requested code.
        code: String,
    },
}

/// Datacenter with its derived code and country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatacenterRecord {
    /// Datacenter ID.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Derived code.
    pub code: String,
    /// ISO country code, empty if unknown.
    pub country: String,
    /// English country name, if known.
    pub country_name: Option<String>,
}

impl From<&Datacenter> for DatacenterRecord {
    fn from(dc: &Datacenter) -> Self {
        let country = datacenter_country_code(dc);
        Self {
            id: dc.id,
            name: dc.name.clone(),
            code: datacenter_code(dc),
            country: country.to_string(),
            country_name: country_name(country).map(str::to_string),
        }
    }
}

/// OS image with its derived code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsRecord {
    /// OS ID.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Derived code.
    pub code: String,
    /// Whether the image can be used for new servers.
    pub is_active: bool,
    /// OS family.
    pub os_type: String,
    /// Whether SSH keys can be injected.
    pub ssh_keys_supported: bool,
}

impl From<&OperatingSystem> for OsRecord {
    fn from(os: &OperatingSystem) -> Self {
        Self {
            id: os.id,
            name: os.name.clone(),
            code: os_code(os),
            is_active: os.is_active,
            os_type: os.os_type.clone(),
            ssh_keys_supported: os.ssh_keys_supported,
        }
    }
}

/// Configured VDS provider.
pub struct VdsProvider {
    client: Arc<VdsClient>,
}

impl VdsProvider {
    /// Configure the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is available or the HTTP client cannot be built.
    pub fn configure(cfg: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = VdsClient::new(cfg.resolve()?)?;
        tracing::debug!(endpoint = %client.config().endpoint, "provider configured");
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Virtual server resource.
    #[must_use]
    pub fn vps(&self) -> VpsResource {
        VpsResource::new(Arc::clone(&self.client))
    }

    /// SSH key resource.
    #[must_use]
    pub fn ssh_keys(&self) -> SshKeyResource {
        SshKeyResource::new(Arc::clone(&self.client))
    }

    /// All datacenters.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn datacenters(&self) -> Result<Vec<DatacenterRecord>, LookupError> {
        let resp = self
            .client
            .list_datacenters()
            .await
            .map_err(|source| LookupError::Client {
                what: "datacenters",
                source,
            })?;
        Ok(resp.datacenters.iter().map(DatacenterRecord::from).collect())
    }

    /// Datacenter whose derived code equals `code`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if no datacenter has this code.
    pub async fn datacenter_by_code(&self, code: &str) -> Result<DatacenterRecord, LookupError> {
        self.datacenters()
            .await?
            .into_iter()
            .find(|dc| dc.code == code)
            .ok_or_else(|| LookupError::NotFound {
                what: "datacenter",
                code: code.to_string(),
            })
    }

    /// All OS images.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn operating_systems(&self) -> Result<Vec<OsRecord>, LookupError> {
        let resp = self
            .client
            .list_os()
            .await
            .map_err(|source| LookupError::Client { what: "OS list", source })?;
        Ok(resp.os.iter().map(OsRecord::from).collect())
    }

    /// OS image whose derived code equals `code`, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if no image has this code.
    pub async fn os_by_code(&self, code: &str) -> Result<OsRecord, LookupError> {
        let wanted = code.to_lowercase();
        self.operating_systems()
            .await?
            .into_iter()
            .find(|os| os.code == wanted)
            .ok_or_else(|| LookupError::NotFound {
                what: "OS",
                code: code.to_string(),
            })
    }

    /// All virtual servers, as resource states.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn servers(&self) -> Result<Vec<VpsState>, LookupError> {
        let resp = self
            .client
            .list_servers()
            .await
            .map_err(|source| LookupError::Client {
                what: "VPS list",
                source,
            })?;
        Ok(resp.servers.iter().map(VpsState::from_remote).collect())
    }

    /// All SSH keys, as resource states.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn ssh_key_list(&self) -> Result<Vec<SshKeyState>, LookupError> {
        let resp = self
            .client
            .list_ssh_keys()
            .await
            .map_err(|source| LookupError::Client {
                what: "SSH list",
                source,
            })?;
        Ok(resp.ssh_keys.iter().map(SshKeyState::from).collect())
    }
}
