//! VDS API wire types.
//!
//! Attributes that a response may omit are `Option<T>` so that "absent" stays
//! distinguishable from an explicit zero or empty string.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Datacenters
// ============================================================================

/// A datacenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    /// Datacenter ID.
    pub id: i32,
    /// Display name, e.g. "Москва: Rucloud".
    pub name: String,
    /// Available VPS tariffs.
    #[serde(default)]
    pub vps_tariffs: Vec<i32>,
    /// Available drive tariffs.
    #[serde(default)]
    pub drive_tariffs: Vec<i32>,
    /// Available additional drive tariffs.
    #[serde(default)]
    pub additional_drive_tariffs: Vec<i32>,
    /// Available additional service tariffs.
    #[serde(default)]
    pub additional_service_tariffs: Vec<i32>,
}

/// Response of `GET /datacenters`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatacentersResponse {
    /// Datacenters.
    pub datacenters: Vec<Datacenter>,
}

// ============================================================================
// Operating systems
// ============================================================================

/// Minimal hardware requirements of an OS image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OsRequirements {
    /// CPU cores.
    #[serde(default)]
    pub cpu: i32,
    /// RAM in GB.
    #[serde(default)]
    pub ram: f32,
    /// Drive size in GB.
    #[serde(default)]
    pub drive: i32,
}

/// An OS image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingSystem {
    /// OS ID.
    pub id: i32,
    /// Display name, e.g. "Ubuntu 22.04 (LTS)".
    pub name: String,
    /// Whether the image can be used for new servers.
    #[serde(default)]
    pub is_active: bool,
    /// OS family.
    #[serde(rename = "type", default)]
    pub os_type: String,
    /// Whether SSH keys can be injected.
    #[serde(default)]
    pub ssh_keys_supported: bool,
    /// Hardware requirements.
    #[serde(rename = "os_requirements", default)]
    pub requirements: OsRequirements,
}

/// Response of `GET /os`.
#[derive(Debug, Clone, Deserialize)]
pub struct OsResponse {
    /// OS images.
    pub os: Vec<OperatingSystem>,
}

// ============================================================================
// Virtual servers
// ============================================================================

/// IPv4 network interface of a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkV4 {
    /// IP address.
    #[serde(default)]
    pub ip_address: String,
    /// Netmask.
    #[serde(default)]
    pub netmask: String,
    /// Gateway.
    #[serde(default)]
    pub gateway: String,
}

/// A virtual server as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualServer {
    /// Server ID.
    #[serde(default)]
    pub virtual_server_id: i32,
    /// Status, e.g. "creating", "active".
    #[serde(default)]
    pub status: Option<String>,
    /// Creation progress in percent.
    #[serde(default)]
    pub create_progress: Option<i32>,
    /// Datacenter ID.
    #[serde(default)]
    pub datacenter: Option<i32>,
    /// Tariff ID.
    #[serde(default)]
    pub tariff_id: Option<i32>,
    /// Payment period.
    #[serde(default)]
    pub payment_period: Option<i32>,
    /// OS ID.
    #[serde(default)]
    pub os_id: Option<i32>,
    /// Template ID.
    #[serde(default)]
    pub template_id: Option<String>,
    /// CPU cores.
    #[serde(default)]
    pub cpu: Option<i32>,
    /// RAM in GB.
    #[serde(default)]
    pub ram: Option<f32>,
    /// VRAM in MB.
    #[serde(default)]
    pub vram: Option<i32>,
    /// Primary drive size in GB.
    #[serde(default)]
    pub drive: Option<i32>,
    /// Primary drive tariff ID.
    #[serde(default)]
    pub drive_tariff_id: Option<i32>,
    /// Additional drive size in GB.
    #[serde(default)]
    pub additional_drive: Option<i32>,
    /// Additional drive tariff ID.
    #[serde(default)]
    pub additional_drive_tariff_id: Option<i32>,
    /// Number of IPv4 addresses.
    #[serde(default)]
    pub ip: Option<i32>,
    /// DDoS protection level.
    #[serde(default)]
    pub ddos_protection: Option<f32>,
    /// User comment.
    #[serde(default)]
    pub user_comment: Option<String>,
    /// Date until which the server is paid.
    #[serde(default)]
    pub paid_till: Option<String>,
    /// Attached SSH key ID.
    #[serde(default)]
    pub ssh_key_id: Option<String>,
    /// Computer name.
    #[serde(default)]
    pub computer_name: Option<String>,
    /// IPv4 interfaces.
    #[serde(default)]
    pub network_v4: Vec<NetworkV4>,
}

impl VirtualServer {
    /// First network interface, if any.
    #[must_use]
    pub fn primary_network(&self) -> Option<&NetworkV4> {
        self.network_v4.first()
    }
}

/// Response of `GET /servers`.
#[derive(Debug, Clone, Deserialize)]
pub struct VirtualServersResponse {
    /// Servers.
    pub servers: Vec<VirtualServer>,
}

/// Body of `POST /servers`: the mandatory parameters only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateServerRequest {
    /// Datacenter ID.
    pub datacenter: i32,
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
}

/// Successful response of `POST /servers`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServerResponse {
    /// New server ID.
    pub virtual_server_id: i32,
    /// Payment period.
    #[serde(default)]
    pub payment_period: Option<i32>,
    /// Cost in roubles.
    #[serde(default)]
    pub cost_rub: Option<f64>,
    /// Initial administrator password.
    #[serde(default)]
    pub password: Option<String>,
    /// Server status snapshot.
    #[serde(default)]
    pub status: VirtualServer,
}

// ============================================================================
// SSH keys
// ============================================================================

/// An SSH key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    /// Key ID.
    pub ssh_key_id: String,
    /// Key name.
    #[serde(default)]
    pub name: String,
    /// Public key.
    #[serde(default)]
    pub public_key: String,
    /// MD5 fingerprint.
    #[serde(default)]
    pub md5_fingerprint: String,
    /// SHA256 fingerprint.
    #[serde(default)]
    pub sha256_fingerprint: String,
}

/// Response of `GET /ssh_keys`.
#[derive(Debug, Clone, Deserialize)]
pub struct SshKeysResponse {
    /// SSH keys.
    pub ssh_keys: Vec<SshKey>,
}

/// Body of `POST /ssh_keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSshKeyRequest {
    /// Key name.
    pub name: String,
    /// Public key.
    pub public_key: String,
}

// ============================================================================
// Actions and errors
// ============================================================================

/// Acknowledgement of an asynchronous mutation. Not polled to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActionResult {
    /// Action ID.
    #[serde(default)]
    pub id: i64,
    /// Action kind, e.g. "remove".
    #[serde(rename = "type", default)]
    pub action_type: String,
    /// Action status.
    #[serde(default)]
    pub status: String,
    /// Progress in percent.
    #[serde(default)]
    pub progress: i32,
    /// Start time.
    #[serde(default)]
    pub started: Option<String>,
    /// Finish time.
    #[serde(default)]
    pub finished: Option<String>,
    /// Affected resource ID.
    #[serde(default)]
    pub resource_id: i64,
    /// Affected resource kind.
    #[serde(default)]
    pub resource_type: String,
}

/// Error description returned by the API alongside a failed status.
///
/// The two-factor fields are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Error ID.
    #[serde(default)]
    pub id: String,
    /// User ID.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Two-factor challenge ID.
    #[serde(default)]
    pub two_factor_id: Option<String>,
    /// Two-factor secret.
    #[serde(default)]
    pub two_factor_secret: Option<String>,
    /// Two-factor one-time password.
    #[serde(default)]
    pub two_factor_otp: Option<String>,
    /// Two-factor SMS channel.
    #[serde(default)]
    pub two_factor_sms: Option<String>,
    /// Two-factor email channel.
    #[serde(default)]
    pub two_factor_email: Option<String>,
}

// Never print the secret or the OTP.
impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id={})", self.message, self.id)?;
        if let Some(user_id) = &self.user_id {
            write!(f, ", user_id={user_id}")?;
        }
        if let Some(challenge) = &self.two_factor_id {
            write!(f, ", two_factor_id={challenge}")?;
        }
        if let Some(sms) = &self.two_factor_sms {
            write!(f, ", two_factor_sms={sms}")?;
        }
        if let Some(email) = &self.two_factor_email {
            write!(f, ", two_factor_email={email}")?;
        }
        Ok(())
    }
}
