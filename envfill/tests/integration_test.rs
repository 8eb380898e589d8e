//! Integration tests

use envfill::{Converters, EnvFill, Error, FieldError, Options, Record, UrlRef};
use serde::Deserialize;
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Duration;

fn clear(keys: &[&str]) {
    for key in keys {
        env::remove_var(key);
    }
}

#[derive(Debug, Default, EnvFill)]
struct BasicConfig {
    pub database_url: String,
    pub port: u16,
    pub debug: bool,
    pub ratio: f64,
    pub timeout: Duration,
    pub endpoint: Option<UrlRef>,
}

const BASIC_KEYS: &[&str] = &[
    "DATABASE_URL",
    "PORT",
    "DEBUG",
    "RATIO",
    "TIMEOUT",
    "ENDPOINT",
];

#[derive(Debug, Default, EnvFill)]
struct ConfigWithDefaults {
    #[env(default = "127.0.0.1:8080")]
    pub server_addr: String,

    #[env(default = 10)]
    pub max_connections: u32,

    #[env(default = false)]
    pub debug_mode: bool,

    #[env(default = "1m30s")]
    pub idle_timeout: Duration,
}

const DEFAULT_KEYS: &[&str] = &["SERVER_ADDR", "MAX_CONNECTIONS", "DEBUG_MODE", "IDLE_TIMEOUT"];

#[derive(Debug, Default, EnvFill)]
struct ConfigWithRequired {
    #[env(name = "API_KEY,required")]
    pub api_key: String,

    #[env(required, default = "unused")]
    pub region: String,
}

#[test]
#[serial]
fn test_basic_config() {
    env::set_var("DATABASE_URL", "postgres://localhost/test");
    env::set_var("PORT", "5432");
    env::set_var("DEBUG", "T");
    env::set_var("RATIO", "0.25");
    env::set_var("TIMEOUT", "2h45m");
    env::set_var("ENDPOINT", "https://example.com/api");

    let config = BasicConfig::from_env().unwrap();
    assert_eq!(config.database_url, "postgres://localhost/test");
    assert_eq!(config.port, 5432);
    assert!(config.debug);
    assert_eq!(config.ratio, 0.25);
    assert_eq!(config.timeout, Duration::from_secs(2 * 3600 + 45 * 60));
    assert_eq!(
        config.endpoint.as_ref().map(UrlRef::as_str),
        Some("https://example.com/api")
    );

    clear(BASIC_KEYS);
}

#[test]
#[serial]
fn test_unset_fields_keep_their_value() {
    clear(BASIC_KEYS);

    let mut config = BasicConfig {
        database_url: "sqlite::memory:".to_string(),
        port: 1,
        ..BasicConfig::default()
    };
    envfill::parse(&mut config).unwrap();
    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.port, 1);
    assert!(config.endpoint.is_none());
}

#[test]
#[serial]
fn test_empty_value_is_treated_as_unset() {
    env::set_var("PORT", "");

    let mut config = BasicConfig {
        port: 7,
        ..BasicConfig::default()
    };
    envfill::parse(&mut config).unwrap();
    assert_eq!(config.port, 7);

    clear(BASIC_KEYS);
}

#[test]
#[serial]
fn test_config_with_defaults() {
    clear(DEFAULT_KEYS);

    let config = ConfigWithDefaults::from_env().unwrap();
    assert_eq!(config.server_addr, "127.0.0.1:8080");
    assert_eq!(config.max_connections, 10);
    assert!(!config.debug_mode);
    assert_eq!(config.idle_timeout, Duration::from_secs(90));
}

#[test]
#[serial]
fn test_config_override_defaults() {
    env::set_var("SERVER_ADDR", "0.0.0.0:9090");
    env::set_var("MAX_CONNECTIONS", "20");
    env::set_var("DEBUG_MODE", "true");
    env::set_var("IDLE_TIMEOUT", "300ms");

    let config = ConfigWithDefaults::from_env().unwrap();
    assert_eq!(config.server_addr, "0.0.0.0:9090");
    assert_eq!(config.max_connections, 20);
    assert!(config.debug_mode);
    assert_eq!(config.idle_timeout, Duration::from_millis(300));

    clear(DEFAULT_KEYS);
}

#[test]
#[serial]
fn test_required_beats_default() {
    clear(&["API_KEY", "REGION"]);

    let error = ConfigWithRequired::from_env().unwrap_err();
    let errors = error.field_errors();
    assert_eq!(errors.len(), 2);
    assert!(matches!(&errors[0], FieldError::RequiredNotSet { key } if key == "API_KEY"));
    assert!(matches!(&errors[1], FieldError::RequiredNotSet { key } if key == "REGION"));
    assert_eq!(
        error.to_string(),
        "required environment variable \"API_KEY\" is not set. \
         required environment variable \"REGION\" is not set"
    );
}

#[test]
#[serial]
fn test_required_satisfied_by_empty_value() {
    env::set_var("API_KEY", "secret");
    env::set_var("REGION", "");

    let config = ConfigWithRequired::from_env().unwrap();
    assert_eq!(config.api_key, "secret");
    assert_eq!(config.region, "");

    clear(&["API_KEY", "REGION"]);
}

#[test]
#[serial]
fn test_errors_are_aggregated() {
    #[derive(Debug, Default, EnvFill)]
    struct Bounds {
        #[env(name = "LIMIT_A")]
        pub a: u8,
        #[env(name = "LIMIT_B")]
        pub b: u8,
        #[env(name = "LIMIT_C")]
        pub c: u8,
    }

    env::set_var("LIMIT_A", "256");
    env::set_var("LIMIT_B", "3");
    env::set_var("LIMIT_C", "x");

    let mut bounds = Bounds::default();
    let error = envfill::parse(&mut bounds).unwrap_err();
    let keys: Vec<_> = error
        .field_errors()
        .iter()
        .filter_map(|e| match e {
            FieldError::Convert { key, .. } => Some(key.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(keys, vec!["LIMIT_A", "LIMIT_C"]);
    assert_eq!(bounds.b, 3);

    clear(&["LIMIT_A", "LIMIT_B", "LIMIT_C"]);
}

#[test]
#[serial]
fn test_unrecognized_option() {
    #[derive(Debug, Default, EnvFill)]
    struct Typo {
        #[env(name = "TYPO_PORT,optional")]
        pub port: u16,
    }

    env::set_var("TYPO_PORT", "80");

    let error = Typo::from_env().unwrap_err();
    assert!(matches!(
        &error.field_errors()[0],
        FieldError::UnrecognizedOption { field: "port", option } if option == "optional"
    ));

    env::remove_var("TYPO_PORT");
}

#[derive(Debug, Default, EnvFill)]
struct Sequences {
    pub ports: Vec<u16>,

    #[env(separator = ";")]
    pub weights: Vec<f32>,

    pub names: Vec<String>,

    pub addrs: Vec<Box<IpAddr>>,

    pub timeouts: Vec<Duration>,
}

const SEQUENCE_KEYS: &[&str] = &["PORTS", "WEIGHTS", "NAMES", "ADDRS", "TIMEOUTS"];

#[test]
#[serial]
fn test_sequences() {
    env::set_var("PORTS", "1,2,3");
    env::set_var("WEIGHTS", "0.5;1.5");
    env::set_var("NAMES", "a,,b");
    env::set_var("ADDRS", "127.0.0.1,::1");
    env::set_var("TIMEOUTS", "1s,2ms");

    let config = Sequences::from_env().unwrap();
    assert_eq!(config.ports, vec![1, 2, 3]);
    assert_eq!(config.weights, vec![0.5, 1.5]);
    assert_eq!(config.names, vec!["a", "", "b"]);
    assert_eq!(
        config.addrs,
        vec![
            Box::new("127.0.0.1".parse::<IpAddr>().unwrap()),
            Box::new("::1".parse::<IpAddr>().unwrap()),
        ]
    );
    assert_eq!(
        config.timeouts,
        vec![Duration::from_secs(1), Duration::from_millis(2)]
    );

    clear(SEQUENCE_KEYS);
}

#[test]
#[serial]
fn test_builtin_sequences() {
    #[derive(Debug, Default, EnvFill)]
    struct Builtins {
        #[env(name = "SEQ_FLAGS")]
        pub flags: Vec<bool>,
        #[env(name = "SEQ_OFFSETS")]
        pub offsets: Vec<i64>,
        #[env(name = "SEQ_SIZES")]
        pub sizes: Vec<u64>,
        #[env(name = "SEQ_MIRRORS", separator = " ")]
        pub mirrors: Vec<UrlRef>,
    }

    env::set_var("SEQ_FLAGS", "1,F,true");
    env::set_var("SEQ_OFFSETS", "-9223372036854775808,0,42");
    env::set_var("SEQ_SIZES", "18446744073709551615,7");
    env::set_var("SEQ_MIRRORS", "https://a.example/pkg /api/v1?x=1");

    let config = Builtins::from_env().unwrap();
    assert_eq!(config.flags, vec![true, false, true]);
    assert_eq!(config.offsets, vec![i64::MIN, 0, 42]);
    assert_eq!(config.sizes, vec![u64::MAX, 7]);
    let mirrors: Vec<_> = config.mirrors.iter().map(UrlRef::as_str).collect();
    assert_eq!(mirrors, vec!["https://a.example/pkg", "/api/v1?x=1"]);
    assert!(config.mirrors[1].is_relative());

    env::set_var("SEQ_SIZES", "1,-1");
    let error = Builtins::from_env().unwrap_err();
    assert!(matches!(
        &error.field_errors()[0],
        FieldError::Convert { key, ty: "Vec<u64>", .. } if key == "SEQ_SIZES"
    ));

    clear(&["SEQ_FLAGS", "SEQ_OFFSETS", "SEQ_SIZES", "SEQ_MIRRORS"]);
}

#[test]
#[serial]
fn test_relative_url() {
    #[derive(Debug, Default, EnvFill)]
    struct Api {
        #[env(name = "API_BASE")]
        pub base: UrlRef,
        #[env(name = "API_HEALTH")]
        pub health: Option<UrlRef>,
    }

    env::set_var("API_BASE", "/api/v1?x=1");
    env::set_var("API_HEALTH", "https://example.com/healthz");

    let api = Api::from_env().unwrap();
    assert_eq!(api.base, UrlRef::Relative("/api/v1?x=1".to_string()));
    assert!(api.health.as_ref().is_some_and(|url| url.as_url().is_some()));

    env::set_var("API_BASE", "http://[::1");
    assert!(Api::from_env().is_err());

    clear(&["API_BASE", "API_HEALTH"]);
}

#[test]
#[serial]
fn test_sequence_element_error_leaves_field_unchanged() {
    clear(SEQUENCE_KEYS);
    env::set_var("PORTS", "1,x,3");

    let mut config = Sequences {
        ports: vec![9],
        ..Sequences::default()
    };
    let error = envfill::parse(&mut config).unwrap_err();
    assert_eq!(config.ports, vec![9]);
    assert!(error.to_string().contains("element 1"));

    env::remove_var("PORTS");
}

#[derive(Debug, Default, EnvFill)]
struct Paths {
    #[env(name = "APP_HOME_DIR", expand)]
    pub home: String,

    #[env(name = "APP_RAW_DIR")]
    pub raw: String,

    #[env(name = "APP_CACHE_DIR", default = "${APP_BASE}/cache", expand = "true")]
    pub cache: String,
}

#[test]
#[serial]
fn test_expansion() {
    env::set_var("APP_BASE", "/srv");
    env::set_var("APP_HOME_DIR", "$APP_BASE/home");
    env::set_var("APP_RAW_DIR", "$APP_BASE/raw");
    env::remove_var("APP_CACHE_DIR");

    let paths = Paths::from_env().unwrap();
    assert_eq!(paths.home, "/srv/home");
    assert_eq!(paths.raw, "$APP_BASE/raw");
    assert_eq!(paths.cache, "/srv/cache");

    clear(&["APP_BASE", "APP_HOME_DIR", "APP_RAW_DIR"]);
}

#[derive(Debug, Default, EnvFill)]
struct Database {
    #[env(name = "DB_HOST", default = "localhost")]
    pub host: String,

    #[env(name = "DB_POOL")]
    pub pool: u32,
}

#[derive(Debug, Default, EnvFill)]
struct Service {
    #[env(name = "SERVICE_NAME")]
    pub name: String,

    #[env(nested)]
    pub database: Option<Box<Database>>,

    #[env(skip)]
    pub generation: u64,
}

#[test]
#[serial]
fn test_nested_record_with_prefix() {
    env::set_var("APP_SERVICE_NAME", "billing");
    env::set_var("APP_DB_POOL", "8");

    let mut service = Service {
        database: Some(Box::default()),
        generation: 3,
        ..Service::default()
    };
    envfill::parse_with_prefix(&mut service, "APP_").unwrap();
    assert_eq!(service.name, "billing");
    assert_eq!(service.generation, 3);

    let database = service.database.unwrap();
    assert_eq!(database.host, "localhost");
    assert_eq!(database.pool, 8);

    clear(&["APP_SERVICE_NAME", "APP_DB_POOL"]);
}

#[test]
#[serial]
fn test_absent_nested_record_is_left_alone() {
    env::set_var("SERVICE_NAME", "billing");
    env::set_var("DB_POOL", "8");

    let service = Service::from_env().unwrap();
    assert_eq!(service.name, "billing");
    assert!(service.database.is_none());

    clear(&["SERVICE_NAME", "DB_POOL"]);
}

#[test]
#[serial]
fn test_nested_error_is_returned() {
    env::set_var("DB_POOL", "many");

    let mut service = Service {
        database: Some(Box::default()),
        ..Service::default()
    };
    let error = envfill::parse(&mut service).unwrap_err();
    assert!(matches!(
        &error.field_errors()[0],
        FieldError::Convert { key, ty: "u32", .. } if key == "DB_POOL"
    ));

    env::remove_var("DB_POOL");
}

#[test]
#[serial]
fn test_missing_record_is_rejected() {
    env::set_var("DATABASE_URL", "postgres://localhost/test");

    let mut config: Option<BasicConfig> = None;
    let result = envfill::parse(&mut config);
    assert!(matches!(result, Err(Error::NotAStructPtr)));
    assert_eq!(
        result.unwrap_err().to_string(),
        "expected a mutable reference to a record"
    );

    env::remove_var("DATABASE_URL");
}

#[derive(Debug, Default, PartialEq, Deserialize)]
struct Limits {
    burst: u32,
    rate: f64,
}

#[derive(Debug, Default, EnvFill)]
struct WithCustomTypes {
    #[env(name = "APP_LABELS")]
    pub labels: HashMap<String, String>,

    #[env(name = "APP_LIMITS")]
    pub limits: Limits,

    #[env(name = "APP_LEVEL")]
    pub level: i64,
}

fn json_converters() -> Converters {
    Converters::new()
        .with(|raw: &str| serde_json::from_str::<HashMap<String, String>>(raw))
        .with(|raw: &str| serde_json::from_str::<Limits>(raw))
}

#[test]
#[serial]
fn test_custom_converters() {
    env::set_var("APP_LABELS", r#"{"team":"core"}"#);
    env::set_var("APP_LIMITS", r#"{"burst":5,"rate":0.5}"#);
    env::set_var("APP_LEVEL", "2");

    let mut config = WithCustomTypes::default();
    envfill::parse_with_funcs(&mut config, json_converters()).unwrap();
    assert_eq!(config.labels.get("team").map(String::as_str), Some("core"));
    assert_eq!(config.limits, Limits { burst: 5, rate: 0.5 });
    assert_eq!(config.level, 2);

    clear(&["APP_LABELS", "APP_LIMITS", "APP_LEVEL"]);
}

#[test]
#[serial]
fn test_custom_converter_takes_precedence() {
    env::set_var("TENANT_APP_LEVEL", "high");

    let converters = Converters::new().with(|raw: &str| match raw {
        "low" => Ok(1i64),
        "high" => Ok(10i64),
        other => Err(format!("unknown level {other}")),
    });

    let mut config = WithCustomTypes::default();
    envfill::parse_with_prefix_funcs(&mut config, "TENANT_", converters).unwrap();
    assert_eq!(config.level, 10);

    env::set_var("TENANT_APP_LEVEL", "7");
    let converters = Converters::new().with(|raw: &str| match raw {
        "high" => Ok(10i64),
        other => Err(format!("unknown level {other}")),
    });
    let error = envfill::parse_with_prefix_funcs(&mut config, "TENANT_", converters).unwrap_err();
    assert!(matches!(
        &error.field_errors()[0],
        FieldError::Custom { key, message } if key == "TENANT_APP_LEVEL" && message == "unknown level 7"
    ));

    env::remove_var("TENANT_APP_LEVEL");
}

#[test]
#[serial]
fn test_unsupported_types() {
    #[derive(Debug, Default, EnvFill)]
    struct Unsupported {
        #[env(name = "APP_LABELS")]
        pub labels: HashMap<String, String>,

        #[env(name = "APP_LIMIT_LIST")]
        pub limits: Vec<Limits>,
    }

    env::set_var("APP_LABELS", "{}");
    env::set_var("APP_LIMIT_LIST", "{}");

    let error = Unsupported::from_env().unwrap_err();
    let errors = error.field_errors();
    assert_eq!(errors.len(), 2);
    assert!(matches!(&errors[0], FieldError::UnsupportedType { field: "labels", .. }));
    assert!(matches!(&errors[1], FieldError::UnsupportedSliceType { field: "limits", .. }));

    clear(&["APP_LABELS", "APP_LIMIT_LIST"]);
}

#[test]
#[serial]
fn test_unset_unsupported_field_is_not_an_error() {
    #[derive(Debug, Default, EnvFill)]
    struct Unsupported {
        #[env(name = "APP_LABELS")]
        pub labels: HashMap<String, String>,
    }

    env::remove_var("APP_LABELS");
    assert!(Unsupported::from_env().is_ok());
}

#[test]
#[serial]
fn test_on_set_hook() {
    clear(BASIC_KEYS);
    env::set_var("DATABASE_URL", "postgres://localhost/test");
    env::set_var("PORT", "80");

    let seen = Mutex::new(Vec::new());
    let options = Options::new().on_set(|field, raw| {
        if let Ok(mut seen) = seen.lock() {
            seen.push(format!("{}={raw}", field.key));
        }
    });

    let mut config = BasicConfig::default();
    envfill::parse_with_options(&mut config, &options).unwrap();
    drop(options);
    assert_eq!(
        seen.into_inner().unwrap(),
        vec!["DATABASE_URL=postgres://localhost/test", "PORT=80"]
    );

    clear(BASIC_KEYS);
}

#[test]
#[serial]
fn test_env_accessors() {
    envfill::env::set("ENVFILL_ACCESSOR", "value").unwrap();
    assert_eq!(envfill::env::get("ENVFILL_ACCESSOR"), Some("value".to_string()));
    assert_eq!(envfill::env::must_get("ENVFILL_ACCESSOR"), "value");

    envfill::env::unset("ENVFILL_ACCESSOR").unwrap();
    assert_eq!(envfill::env::get_or("ENVFILL_ACCESSOR", "fallback"), "fallback");
    assert!(envfill::env::get_required("ENVFILL_ACCESSOR").is_err());
}
