//! Example demonstrating sequence fields

use envfill::{EnvFill, Record};
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Default, EnvFill)]
struct Config {
    // Comma-separated by default
    pub allowed_ports: Vec<u16>,

    #[env(separator = ";")]
    pub hosts: Vec<String>,

    // Any FromStr element type works, boxed or not
    pub trusted_proxies: Vec<Box<IpAddr>>,

    pub retry_backoff: Vec<Duration>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("ALLOWED_PORTS", "80,443,8080");
    std::env::set_var("HOSTS", "a.example.com;b.example.com");
    std::env::set_var("TRUSTED_PROXIES", "10.0.0.1,::1");
    std::env::set_var("RETRY_BACKOFF", "100ms,1s,5s");

    let config = Config::from_env()?;

    println!("Sequence configuration:");
    println!("  Allowed ports: {:?}", config.allowed_ports);
    println!("  Hosts: {:?}", config.hosts);
    println!("  Trusted proxies: {:?}", config.trusted_proxies);
    println!("  Retry backoff: {:?}", config.retry_backoff);

    Ok(())
}
