//! Basic usage example

use envfill::{EnvFill, Record};
use std::time::Duration;

#[derive(Debug, Default, EnvFill)]
struct Config {
    pub database_url: String,
    pub api_key: String,
    pub max_connections: u32,
    pub request_timeout: Duration,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("API_KEY", "secret-key-123");
    std::env::set_var("MAX_CONNECTIONS", "16");
    std::env::set_var("REQUEST_TIMEOUT", "1.5s");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  API Key: {}", config.api_key);
    println!("  Max connections: {}", config.max_connections);
    println!("  Request timeout: {:?}", config.request_timeout);

    Ok(())
}
