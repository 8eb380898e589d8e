//! Example demonstrating key prefixes

use envfill::EnvFill;

#[derive(Debug, Default, EnvFill)]
struct Config {
    // Read from MYAPP_DATABASE_URL, MYAPP_API_KEY, etc.
    pub database_url: String,
    pub api_key: String,

    #[env(default = 8080)]
    pub port: u16,

    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("MYAPP_API_KEY", "secret-key-123");
    std::env::set_var("MYAPP_PORT", "3000");
    std::env::set_var("MYAPP_DEBUG", "1");

    let mut config = Config::default();
    envfill::parse_with_prefix(&mut config, "MYAPP_")?;

    println!("Configuration with prefix 'MYAPP_':");
    println!("  Database URL: {}", config.database_url);
    println!("  API Key: {}", config.api_key);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    Ok(())
}
