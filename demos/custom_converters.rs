//! Example demonstrating custom converters
//!
//! Converters are registered per type and take precedence over the built-in
//! conversions.

use envfill::{Converters, EnvFill};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
struct RateLimit {
    burst: u32,
    per_second: f64,
}

#[derive(Debug, Default, EnvFill)]
struct Config {
    // JSON object: {"team":"core","tier":"gold"}
    pub labels: HashMap<String, String>,

    // JSON object: {"burst":10,"per_second":2.5}
    pub rate_limit: RateLimit,

    // Overrides the built-in boolean parsing
    pub maintenance: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("LABELS", r#"{"team":"core","tier":"gold"}"#);
    std::env::set_var("RATE_LIMIT", r#"{"burst":10,"per_second":2.5}"#);
    std::env::set_var("MAINTENANCE", "enabled");

    let converters = Converters::new()
        .with(|raw: &str| serde_json::from_str::<HashMap<String, String>>(raw))
        .with(|raw: &str| serde_json::from_str::<RateLimit>(raw))
        .with(|raw: &str| match raw {
            "enabled" => Ok(true),
            "disabled" => Ok(false),
            other => Err(format!("expected enabled or disabled, got {other:?}")),
        });

    let mut config = Config::default();
    envfill::parse_with_funcs(&mut config, converters)?;

    println!("Configuration with custom converters:");
    println!("  Labels: {:?}", config.labels);
    println!("  Rate limit: {:?}", config.rate_limit);
    println!("  Maintenance: {}", config.maintenance);

    Ok(())
}
