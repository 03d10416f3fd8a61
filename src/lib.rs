//! VDS Provider - typed API client and resource reconciliation for VDS hosting.
//!
//! A library that lets a declarative orchestration host manage VDS resources:
//! - **Transport**: Authenticated HTTP calls with status classification
//! - **Codec**: Typed JSON bodies with a dual-channel error model
//! - **Client**: List/get/create/delete for each remote entity kind
//! - **Codes**: Stable human-readable codes for datacenters and OS images
//! - **Resources**: Virtual server and SSH key reconcilers
//!
//! ## Quick Start
//!
//! Configuration is loaded from environment variables. Create a `.env` file:
//!
//! ```text
//! VDS_API_TOKEN=your_api_token_here
//! VDS_ENDPOINT=https://api.example.com/v2
//! ```
//!
//! Then configure the provider and drive a resource:
//!
//! ```ignore
//! use vds_provider::{ManagedResource, ProviderConfig, VdsProvider, VpsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = VdsProvider::configure(&ProviderConfig::default())?;
//!
//!     let dc = provider.datacenter_by_code("MOSKVA").await?;
//!     let os = provider.os_by_code("42-ubuntu-22.04-lts").await?;
//!
//!     let state = provider
//!         .vps()
//!         .create(VpsConfig {
//!             datacenter_id: dc.id,
//!             os_id: os.id,
//!             tariff_id: 10,
//!             payment_period: 1,
//!             cpu: 2,
//!             ram: 4.0,
//!             drive: 20,
//!             drive_tariff_id: 5,
//!             ip: 1,
//!             ..VpsConfig::default()
//!         })
//!         .await?;
//!     println!("Server {} is {:?}", state.id, state.status);
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy for strict discipline
#![deny(clippy::all)]                 // All standard Clippy lints
#![deny(clippy::pedantic)]            // Very strict Clippy lints
#![deny(clippy::nursery)]             // Experimental lints
#![deny(clippy::unwrap_used)]         // unwrap() is forbidden
#![deny(clippy::expect_used)]         // expect() is forbidden
#![deny(clippy::panic)]               // panic!() is forbidden
#![deny(clippy::print_stdout)]        // println!() is forbidden in production
#![deny(clippy::todo)]                // TODO is forbidden
#![deny(clippy::unimplemented)]       // unimplemented!() is forbidden
#![deny(clippy::missing_const_for_fn)] // Force const when possible
#![deny(clippy::unwrap_in_result)]    // unwrap() in Result is forbidden
#![deny(clippy::module_inception)]    // Module with same name as crate is forbidden
#![deny(clippy::redundant_clone)]     // Useless clones are forbidden
#![deny(clippy::shadow_unrelated)]    // Shadowing unrelated variables is forbidden
#![deny(clippy::too_many_arguments)]  // Limit function arguments
#![deny(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Modules
// ============================================================================

/// Authenticated HTTP transport for the VDS API.
///
/// Use this module to configure credentials and issue raw calls.
pub mod vds_transport;

/// Typed JSON codec over the transport.
///
/// Use this module for generic typed calls and the dual-channel failure type.
pub mod vds_codec;

/// Wire types of the VDS API.
pub mod vds_models;

/// Typed entity client.
///
/// Use this module for datacenter, OS, server and SSH key operations.
pub mod vds_client;

/// Code derivation and static lookup tables.
pub mod vds_codes;

/// Managed resource capability trait and lifecycle errors.
pub mod vds_resource;

/// Virtual server reconciler.
pub mod vds_vps_resource;

/// SSH key reconciler.
pub mod vds_ssh_resource;

/// Provider configuration and read-only lookups.
///
/// Use this module as the entry point from an orchestration host.
pub mod vds_provider;

/// Tracing subscriber setup.
pub mod vds_logging;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use vds_client::VdsClient;
pub use vds_codec::{ApiFailure, ClientError};
pub use vds_logging::init_logging;
pub use vds_models::ApiErrorBody;
pub use vds_provider::{
    DatacenterRecord, LookupError, OsRecord, ProviderConfig, ProviderError, VdsProvider,
};
pub use vds_resource::{ManagedResource, ResourceError};
pub use vds_ssh_resource::{SshKeyConfig, SshKeyResource, SshKeyState};
pub use vds_transport::{VdsClientConfig, VdsTransport};
pub use vds_vps_resource::{VpsConfig, VpsResource, VpsState};
