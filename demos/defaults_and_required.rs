//! Example demonstrating defaults and required keys

use envfill::{EnvFill, FieldError, Record};

#[derive(Debug, Default, EnvFill)]
struct Config {
    #[env(name = "DATABASE_URL,required")]
    pub database_url: String,

    #[env(default = "127.0.0.1")]
    pub host: String,

    #[env(default = 8080)]
    pub port: u16,

    // A default never satisfies a required key
    #[env(required, default = "info")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    std::env::remove_var("DATABASE_URL");
    std::env::remove_var("LOG_LEVEL");

    // Every missing key is reported at once
    match Config::from_env() {
        Ok(config) => println!("Unexpected success: {config:?}"),
        Err(e) => {
            println!("Failed as expected: {e}");
            for error in e.field_errors() {
                if let FieldError::RequiredNotSet { key } = error {
                    println!("  missing: {key}");
                }
            }
        }
    }

    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("LOG_LEVEL", "debug");
    std::env::set_var("PORT", "3000");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Host: {} (default)", config.host);
    println!("  Port: {}", config.port);
    println!("  Log level: {}", config.log_level);

    Ok(())
}
