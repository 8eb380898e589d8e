//! Example demonstrating nested records

use envfill::{EnvFill, Options};

#[derive(Debug, Default, EnvFill)]
struct Database {
    #[env(name = "DB_URL,required")]
    pub url: String,

    #[env(name = "DB_POOL_SIZE", default = 5)]
    pub pool_size: u32,
}

#[derive(Debug, Default, EnvFill)]
struct Cache {
    #[env(name = "CACHE_URL")]
    pub url: String,
}

#[derive(Debug, Default, EnvFill)]
struct Config {
    pub service_name: String,

    // Nested records share the prefix of their parent
    #[env(nested)]
    pub database: Database,

    // `None` is left alone
    #[env(nested)]
    pub cache: Option<Box<Cache>>,

    #[env(skip)]
    pub started_at: Option<std::time::SystemTime>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("PROD_SERVICE_NAME", "billing");
    std::env::set_var("PROD_DB_URL", "postgres://db.internal/billing");
    std::env::set_var("PROD_CACHE_URL", "redis://cache.internal");

    let mut config = Config::default();
    let options = Options::new()
        .prefix("PROD_")
        .on_set(|field, raw| println!("  set {} from {raw:?}", field.key));
    envfill::parse_with_options(&mut config, &options)?;

    println!("Nested configuration:");
    println!("  Service: {}", config.service_name);
    println!("  Database: {:?}", config.database);
    println!("  Cache: {:?}", config.cache);

    config.cache = Some(Box::default());
    envfill::parse_with_options(&mut config, &options)?;
    println!("  Cache (allocated): {:?}", config.cache);

    Ok(())
}
