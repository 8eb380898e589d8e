//! Example demonstrating variable expansion

use envfill::{EnvFill, Record};

#[derive(Debug, Default, EnvFill)]
struct Config {
    #[env(name = "APP_DATA_DIR", default = "${APP_ROOT}/data", expand)]
    pub data_dir: String,

    #[env(name = "APP_LOG_FILE", expand)]
    pub log_file: String,

    // Left as written
    #[env(name = "APP_TEMPLATE")]
    pub template: String,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_ROOT", "/srv/app");
    std::env::remove_var("APP_DATA_DIR");
    std::env::set_var("APP_LOG_FILE", "$APP_ROOT/logs/app.log");
    std::env::set_var("APP_TEMPLATE", "hello $USER");

    let config = Config::from_env()?;

    println!("Configuration with expansion:");
    println!("  Data dir: {}", config.data_dir);
    println!("  Log file: {}", config.log_file);
    println!("  Template: {}", config.template);

    // Expansion is also available on its own
    println!("  Expanded: {}", envfill::expand::expand("${APP_ROOT}/bin", &envfill::ProcessEnv));

    Ok(())
}
