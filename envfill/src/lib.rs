//! Populate configuration structs from environment variables
//!
//! `envfill` walks the fields of a `#[derive(EnvFill)]` struct, reads each
//! field's environment variable, converts it to the field's type and writes it
//! into the struct in place. Every field is attempted; failures are collected
//! and returned together.
//!
//! # Features
//!
//! - **Declarative**: field schema generated with `#[derive(EnvFill)]`
//! - **Populate in place**: unset fields keep the value they already had
//! - **Error aggregation**: one error listing every bad field
//! - **Built-in types**: strings, booleans, integers, floats, durations
//!   (`300ms`, `2h45m`), URL references ([`UrlRef`], absolute or relative),
//!   and `Vec` or `Option` of each
//! - **Any `FromStr` type**: including `Vec<T>`, `Vec<Box<T>>` and `Option<T>`
//! - **Custom converters**: per type, taking precedence over built-ins
//! - **Expansion**: `$VAR` and `${VAR}` references resolved on request
//!
//! # Example
//!
//! ```rust
//! use envfill::EnvFill;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, EnvFill)]
//! struct Config {
//!     #[env(name = "DATABASE_URL", required)]
//!     pub database_url: String,
//!
//!     #[env(default = 8080)]
//!     pub port: u32,
//!
//!     #[env(default = "30s")]
//!     pub timeout: Duration,
//!
//!     #[env(separator = ";")]
//!     pub hosts: Vec<String>,
//! }
//!
//! # fn main() -> Result<(), envfill::Error> {
//! #     std::env::set_var("DATABASE_URL", "postgres://localhost/db");
//! #     std::env::set_var("HOSTS", "a;b");
//! let mut config = Config::default();
//! envfill::parse(&mut config)?;
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.hosts, vec!["a", "b"]);
//! #     Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "KEY")]`
//!
//! Environment variable for the field. Defaults to the field name in upper
//! case. Options may follow the key after commas: `name = "PORT,required"`.
//!
//! ## `#[env(required)]`
//!
//! The variable must be set, even to the empty string. A declared default
//! does not satisfy it.
//!
//! ## `#[env(default = "value")]`
//!
//! Literal converted when the variable is not set. Numbers and booleans may
//! be written without quotes.
//!
//! ## `#[env(expand)]`
//!
//! Expand `$VAR` and `${VAR}` in the value (or the default).
//!
//! ```rust
//! # use envfill::{EnvFill, Record};
//! #[derive(Default, EnvFill)]
//! struct Paths {
//!     #[env(name = "APP_DATA", default = "${HOME}/data", expand)]
//!     pub data: String,
//! }
//! # fn main() -> Result<(), envfill::Error> {
//! #     std::env::set_var("HOME", "/home/app");
//! #     std::env::remove_var("APP_DATA");
//! let paths = Paths::from_env()?;
//! assert_eq!(paths.data, "/home/app/data");
//! #     Ok(())
//! # }
//! ```
//!
//! ## `#[env(separator = ";")]`
//!
//! Separator for `Vec` fields, `,` by default. Empty elements are kept.
//!
//! ## `#[env(nested)]`
//!
//! The field is itself a record (`T`, `Box<T>`, `Option<T>` or
//! `Option<Box<T>>`). It is populated with the same prefix and converters;
//! `None` is left alone.
//!
//! ## `#[env(skip)]`
//!
//! The field is not read from the environment.

#[doc(hidden)]
pub mod __private;

pub mod convert;
mod duration;
pub mod env;
mod error;
pub mod expand;
mod parse;
mod record;
pub mod resolve;
pub mod seq;
mod url_ref;

pub use convert::Converters;
pub use duration::parse_duration;
pub use env::{MapStore, ProcessEnv, Store};
pub use envfill_derive::EnvFill;
pub use error::{ConvertError, EnvError, Error, FieldError};
pub use parse::{
    parse, parse_with_funcs, parse_with_options, parse_with_prefix, parse_with_prefix_funcs,
    Options,
};
pub use record::{Decode, FieldDescriptor, FieldTarget, Record, RecordRef, Slot, REQUIRED};
pub use url_ref::UrlRef;
