//! Shared stub-server setup for integration tests.

use std::sync::Arc;

use vds_provider::{VdsClient, VdsClientConfig};
use wiremock::MockServer;

/// Token every stubbed request is expected to carry.
pub const TOKEN: &str = "test-token";

/// Client pointed at `<server>/v2`.
pub fn client_for(server: &MockServer) -> Arc<VdsClient> {
    let cfg = VdsClientConfig::new(TOKEN, Some(format!("{}/v2", server.uri())));
    Arc::new(VdsClient::new(cfg).expect("failed to build client"))
}
