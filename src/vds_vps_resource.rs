//! Virtual server resource.
//!
//! Unique responsibility: map a declared virtual server onto the VDS API and
//! keep the persisted state in line with what the API reports.
//!
//! Lifecycle: absent -> creating -> present -> deleted.
//!
//! Notes:
//! - Creation sends only the mandatory parameters; optional fields of the
//!   configuration are kept in state and reconciled on the next read.
//! - The API has no in-place update; updates are written to state only.
//! - Deletion runs asynchronously on the remote side and is not awaited.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::vds_client::VdsClient;
use crate::vds_models::{CreateServerRequest, NetworkV4, VirtualServer};
use crate::vds_resource::{ManagedResource, ResourceError};

const KIND: &str = "virtual server";

/// Declared configuration of a virtual server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VpsConfig {
    /// Datacenter ID.
    pub datacenter_id: i32,
    /// Tariff ID.
    pub tariff_id: i32,
    /// Payment period.
    pub payment_period: i32,
    /// OS ID.
    pub os_id: i32,
    /// CPU cores.
    pub cpu: i32,
    /// RAM in GB.
    pub ram: f32,
    /// Primary drive size in GB.
    pub drive: i32,
    /// Primary drive tariff ID.
    pub drive_tariff_id: i32,
    /// Number of IPv4 addresses.
    pub ip: i32,
    /// VRAM in MB.
    #[serde(default)]
    pub vram: Option<i32>,
    /// DDoS protection level.
    #[serde(default)]
    pub ddos_protection: Option<f32>,
    /// Template ID.
    #[serde(default)]
    pub template_id: Option<String>,
    /// Additional drive size in GB.
    #[serde(default)]
    pub additional_drive: Option<i32>,
    /// Additional drive tariff ID.
    #[serde(default)]
    pub additional_drive_tariff_id: Option<i32>,
    /// User comment.
    #[serde(default)]
    pub user_comment: Option<String>,
    /// SSH key ID.
    #[serde(default)]
    pub ssh_key_id: Option<String>,
    /// Computer name.
    #[serde(default)]
    pub computer_name: Option<String>,
}

impl VpsConfig {
    /// Minimal creation request built from the mandatory fields.
    #[must_use]
    pub const fn create_request(&self) -> CreateServerRequest {
        CreateServerRequest {
            datacenter: self.datacenter_id,
            tariff_id: self.tariff_id,
            payment_period: self.payment_period,
            os_id: self.os_id,
            cpu: self.cpu,
            ram: self.ram,
            drive: self.drive,
            drive_tariff_id: self.drive_tariff_id,
            ip: self.ip,
        }
    }
}

/// Persisted state of a virtual server.
///
/// `None` is the explicit "unset" value and is never replaced by a zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VpsState {
    /// Server ID (0 until created or imported).
    pub id: i32,
    /// Status.
    pub status: Option<String>,
    /// Creation progress in percent.
    pub create_progress: Option<i32>,
    /// Datacenter ID.
    pub datacenter_id: i32,
    /// Tariff ID.
    pub tariff_id: i32,
    /// Payment period.
    pub payment_period: i32,
    /// OS ID.
    pub os_id: i32,
    /// CPU cores.
    pub cpu: i32,
    /// RAM in GB.
    pub ram: f32,
    /// VRAM in MB.
    pub vram: Option<i32>,
    /// Primary drive size in GB.
    pub drive: i32,
    /// Primary drive tariff ID.
    pub drive_tariff_id: i32,
    /// Number of IPv4 addresses.
    pub ip: i32,
    /// DDoS protection level.
    pub ddos_protection: Option<f32>,
    /// Date until which the server is paid.
    pub paid_till: Option<String>,
    /// Template ID.
    pub template_id: Option<String>,
    /// Additional drive size in GB.
    pub additional_drive: Option<i32>,
    /// Additional drive tariff ID.
    pub additional_drive_tariff_id: Option<i32>,
    /// User comment.
    pub user_comment: Option<String>,
    /// SSH key ID.
    pub ssh_key_id: Option<String>,
    /// Computer name.
    pub computer_name: Option<String>,
    /// Address of the first network interface.
    pub ip_address: Option<String>,
    /// Netmask of the first network interface.
    pub netmask: Option<String>,
    /// Gateway of the first network interface.
    pub gateway: Option<String>,
}

impl VpsState {
    /// State holding the declared values and no remote-computed ones.
    #[must_use]
    pub fn planned(desired: VpsConfig) -> Self {
        Self {
            datacenter_id: desired.datacenter_id,
            tariff_id: desired.tariff_id,
            payment_period: desired.payment_period,
            os_id: desired.os_id,
            cpu: desired.cpu,
            ram: desired.ram,
            vram: desired.vram,
            drive: desired.drive,
            drive_tariff_id: desired.drive_tariff_id,
            ip: desired.ip,
            ddos_protection: desired.ddos_protection,
            template_id: desired.template_id,
            additional_drive: desired.additional_drive,
            additional_drive_tariff_id: desired.additional_drive_tariff_id,
            user_comment: desired.user_comment,
            ssh_key_id: desired.ssh_key_id,
            computer_name: desired.computer_name,
            ..Self::default()
        }
    }

    /// State rebuilt entirely from a remote server.
    #[must_use]
    pub fn from_remote(vps: &VirtualServer) -> Self {
        let mut state = Self {
            id: vps.virtual_server_id,
            ..Self::default()
        };
        state.merge_remote(vps);
        state
    }

    /// Merge a remote server into this state.
    ///
    /// Required attributes are overwritten when the API reports them. Optional
    /// attributes always take the remote value, so an absent field ends up
    /// `None` rather than keeping a stale value.
    pub fn merge_remote(&mut self, vps: &VirtualServer) {
        overwrite(&mut self.datacenter_id, vps.datacenter);
        overwrite(&mut self.tariff_id, vps.tariff_id);
        overwrite(&mut self.payment_period, vps.payment_period);
        overwrite(&mut self.os_id, vps.os_id);
        overwrite(&mut self.cpu, vps.cpu);
        overwrite(&mut self.ram, vps.ram);
        overwrite(&mut self.drive, vps.drive);
        overwrite(&mut self.drive_tariff_id, vps.drive_tariff_id);
        overwrite(&mut self.ip, vps.ip);

        self.status.clone_from(&vps.status);
        self.create_progress = vps.create_progress;
        self.paid_till.clone_from(&vps.paid_till);
        self.template_id.clone_from(&vps.template_id);
        self.additional_drive = vps.additional_drive;
        self.additional_drive_tariff_id = vps.additional_drive_tariff_id;
        self.user_comment.clone_from(&vps.user_comment);
        self.ssh_key_id.clone_from(&vps.ssh_key_id);
        self.computer_name.clone_from(&vps.computer_name);
        self.vram = vps.vram;
        self.ddos_protection = vps.ddos_protection;

        self.set_network(vps.primary_network());
    }

    fn set_network(&mut self, net: Option<&NetworkV4>) {
        self.ip_address = net.map(|n| n.ip_address.clone());
        self.netmask = net.map(|n| n.netmask.clone());
        self.gateway = net.map(|n| n.gateway.clone());
    }
}

#[inline]
fn overwrite<T>(slot: &mut T, remote: Option<T>) {
    if let Some(value) = remote {
        *slot = value;
    }
}

/// Virtual server lifecycle against the VDS API.
pub struct VpsResource {
    client: Arc<VdsClient>,
}

impl VpsResource {
    /// Create a new virtual server resource.
    #[must_use]
    pub const fn new(client: Arc<VdsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManagedResource for VpsResource {
    type Desired = VpsConfig;
    type State = VpsState;

    async fn create(&self, desired: VpsConfig) -> Result<VpsState, ResourceError> {
        let req = desired.create_request();

        let created = self
            .client
            .create_server(&req)
            .await
            .map_err(|source| ResourceError::Api {
                kind: KIND,
                operation: "create",
                source,
            })?;

        let mut state = VpsState::planned(desired);
        state.id = created.virtual_server_id;
        state.status = created.status.status.clone();
        state.create_progress = created.status.create_progress;
        state.paid_till = created.status.paid_till.clone();
        if let Some(net) = created.status.primary_network() {
            state.set_network(Some(net));
        }

        tracing::trace!(id = state.id, status = ?state.status, "created a virtual server");
        Ok(state)
    }

    async fn read(&self, mut state: VpsState) -> Result<VpsState, ResourceError> {
        if state.id == 0 {
            return Err(ResourceError::MissingId {
                kind: KIND,
                operation: "read",
            });
        }

        let vps = self
            .client
            .get_server(state.id)
            .await
            .map_err(|source| ResourceError::Client {
                kind: KIND,
                operation: "read",
                source,
            })?;

        state.merge_remote(&vps);
        Ok(state)
    }

    async fn update(&self, prior: VpsState, desired: VpsConfig) -> Result<VpsState, ResourceError> {
        // No update endpoint: the declared values are taken as they are.
        let mut state = VpsState::planned(desired);
        state.id = prior.id;
        state.status = prior.status;
        state.create_progress = prior.create_progress;
        state.paid_till = prior.paid_till;
        state.ip_address = prior.ip_address;
        state.netmask = prior.netmask;
        state.gateway = prior.gateway;
        Ok(state)
    }

    async fn delete(&self, state: VpsState) -> Result<(), ResourceError> {
        if state.id == 0 {
            return Err(ResourceError::MissingId {
                kind: KIND,
                operation: "delete",
            });
        }

        let action = self
            .client
            .delete_server(state.id)
            .await
            .map_err(|source| ResourceError::Api {
                kind: KIND,
                operation: "delete",
                source,
            })?;

        tracing::info!(
            server_id = state.id,
            action_id = action.id,
            action_type = %action.action_type,
            status = %action.status,
            progress = action.progress,
            started = ?action.started,
            finished = ?action.finished,
            resource_id = action.resource_id,
            resource_type = %action.resource_type,
            "delete action accepted"
        );
        Ok(())
    }

    fn import(&self, raw: &str) -> Result<VpsState, ResourceError> {
        let id = raw
            .parse::<i32>()
            .map_err(|source| ResourceError::InvalidImportId {
                raw: raw.to_string(),
                source,
            })?;

        Ok(VpsState {
            id,
            ..VpsState::default()
        })
    }
}
