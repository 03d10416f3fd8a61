//! VDS entity client.
//!
//! Unique responsibility: typed list/get/create/delete operations for each
//! remote entity kind, built on the transport and the typed codec.
//!
//! Endpoints:
//! - GET <endpoint>/datacenters
//! - GET <endpoint>/os
//! - GET/POST <endpoint>/servers, GET/DELETE <endpoint>/servers/{id}
//! - GET/POST <endpoint>/ssh_keys, GET/DELETE <endpoint>/ssh_keys/{id}

use crate::vds_codec::{
    ApiFailure, ClientError, fetch_typed, remove_typed, remove_unit, submit_typed,
};
use crate::vds_models::{
    ActionResult, ApiErrorBody, CreateServerRequest, CreateServerResponse, CreateSshKeyRequest,
    DatacentersResponse, OsResponse, SshKey, SshKeysResponse, VirtualServer,
    VirtualServersResponse,
};
use crate::vds_transport::{TransportError, VdsClientConfig, VdsTransport};

/// Typed client for the VDS API.
pub struct VdsClient {
    transport: VdsTransport,
}

impl VdsClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(cfg: VdsClientConfig) -> Result<Self, TransportError> {
        Ok(Self {
            transport: VdsTransport::new(cfg)?,
        })
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub const fn config(&self) -> &VdsClientConfig {
        self.transport.config()
    }

    /// List datacenters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    pub async fn list_datacenters(&self) -> Result<DatacentersResponse, ClientError> {
        fetch_typed(&self.transport, "/datacenters", &[]).await
    }

    /// List OS images.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    pub async fn list_os(&self) -> Result<OsResponse, ClientError> {
        fetch_typed(&self.transport, "/os", &[]).await
    }

    /// List virtual servers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    pub async fn list_servers(&self) -> Result<VirtualServersResponse, ClientError> {
        fetch_typed(&self.transport, "/servers", &[]).await
    }

    /// Get a virtual server by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    pub async fn get_server(&self, id: i32) -> Result<VirtualServer, ClientError> {
        fetch_typed(&self.transport, &server_path(id), &[]).await
    }

    /// Create a virtual server.
    ///
    /// # Errors
    ///
    /// Returns the failure cause and, when decodable, the API error body.
    pub async fn create_server(
        &self,
        req: &CreateServerRequest,
    ) -> Result<CreateServerResponse, ApiFailure<ApiErrorBody>> {
        submit_typed(&self.transport, "/servers", req).await
    }

    /// Delete a virtual server. The deletion completes asynchronously on the
    /// remote side; the returned action is not polled.
    ///
    /// # Errors
    ///
    /// Returns the failure cause and, when decodable, the API error body.
    pub async fn delete_server(&self, id: i32) -> Result<ActionResult, ApiFailure<ApiErrorBody>> {
        remove_typed(&self.transport, &server_path(id)).await
    }

    /// List SSH keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    pub async fn list_ssh_keys(&self) -> Result<SshKeysResponse, ClientError> {
        fetch_typed(&self.transport, "/ssh_keys", &[]).await
    }

    /// Get an SSH key by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    pub async fn get_ssh_key(&self, id: &str) -> Result<SshKey, ClientError> {
        fetch_typed(&self.transport, &ssh_key_path(id), &[]).await
    }

    /// Create an SSH key.
    ///
    /// # Errors
    ///
    /// Returns the failure cause and, when decodable, the API error body.
    pub async fn create_ssh_key(
        &self,
        req: &CreateSshKeyRequest,
    ) -> Result<SshKey, ApiFailure<ApiErrorBody>> {
        submit_typed(&self.transport, "/ssh_keys", req).await
    }

    /// Delete an SSH key. The API answers without a body.
    ///
    /// # Errors
    ///
    /// Returns the failure cause and, when decodable, the API error body.
    pub async fn delete_ssh_key(&self, id: &str) -> Result<(), ApiFailure<ApiErrorBody>> {
        remove_unit(&self.transport, &ssh_key_path(id)).await
    }
}

#[inline]
fn server_path(id: i32) -> String {
    format!("/servers/{id}")
}

#[inline]
fn ssh_key_path(id: &str) -> String {
    format!("/ssh_keys/{id}")
}
