//! Example binary demonstrating the vds_provider library.
//!
//! Lists datacenters and OS images together with the codes that declarative
//! configurations use to refer to them.
//!
//! ## Usage
//!
//! 1. Create a `.env` file with `VDS_API_TOKEN`
//! 2. Run: `cargo run`

#![allow(clippy::print_stdout)] // Allow println! in the binary example

use vds_provider::vds_codes::{datacenter_code, datacenter_country_code, os_code};
use vds_provider::{VdsClient, VdsClientConfig, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let cfg = VdsClientConfig::from_env()?;
    println!("Configuration loaded:");
    println!("  Endpoint: {}", cfg.endpoint);
    println!("  User agent: {}", cfg.user_agent);

    let client = VdsClient::new(cfg)?;

    println!("\nDatacenters:");
    for dc in client.list_datacenters().await?.datacenters {
        println!(
            "  {:>4}  {:<16} {:<3} {}",
            dc.id,
            datacenter_code(&dc),
            datacenter_country_code(&dc),
            dc.name
        );
    }

    println!("\nOS images:");
    for os in client.list_os().await?.os.iter().filter(|os| os.is_active) {
        println!("  {:>4}  {}", os.id, os_code(os));
    }

    Ok(())
}
