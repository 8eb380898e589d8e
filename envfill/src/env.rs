//! Access to the environment variable table
//!
//! The free functions read and write the process environment directly. The
//! population engine goes through the [`Store`] trait instead so that a
//! caller can point it at another table, such as a [`MapStore`].

use crate::error::EnvError;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A key/value environment table.
///
/// Every call hits the underlying table; nothing is cached.
pub trait Store {
    /// Value of `key`, or `None` when it is not set.
    ///
    /// A variable set to the empty string is `Some("")`.
    fn read(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`.
    fn write(&self, key: &str, value: &str) -> Result<(), EnvError>;

    /// Remove `key`. Removing an unset key is not an error.
    fn delete(&self, key: &str) -> Result<(), EnvError>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Store for ProcessEnv {
    fn read(&self, key: &str) -> Option<String> {
        if key.is_empty() || key.contains(['=', '\0']) {
            return None;
        }
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), EnvError> {
        check_key(key)?;
        if value.contains('\0') {
            return Err(EnvError::InvalidValue {
                key: key.to_string(),
            });
        }
        std::env::set_var(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), EnvError> {
        check_key(key)?;
        std::env::remove_var(key);
        Ok(())
    }
}

// `std::env` panics on these instead of reporting them.
fn check_key(key: &str) -> Result<(), EnvError> {
    if key.is_empty() || key.contains(['=', '\0']) {
        return Err(EnvError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// An in-memory environment table.
///
/// Useful for populating records from a fixed set of variables without
/// touching the process environment.
#[derive(Debug, Default)]
pub struct MapStore {
    vars: Mutex<HashMap<String, String>>,
}

impl MapStore {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V> FromIterator<(K, V)> for MapStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            vars: Mutex::new(vars),
        }
    }
}

impl Store for MapStore {
    fn read(&self, key: &str) -> Option<String> {
        let vars = self.vars.lock().unwrap_or_else(PoisonError::into_inner);
        vars.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), EnvError> {
        check_key(key)?;
        let mut vars = self.vars.lock().unwrap_or_else(PoisonError::into_inner);
        vars.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), EnvError> {
        let mut vars = self.vars.lock().unwrap_or_else(PoisonError::into_inner);
        vars.remove(key);
        Ok(())
    }
}

/// Get an environment variable.
pub fn get(key: &str) -> Option<String> {
    ProcessEnv.read(key)
}

/// Get an environment variable, or `default` when it is not set.
pub fn get_or(key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable that must be set.
///
/// An empty value counts as set.
pub fn get_required(key: &str) -> Result<String, EnvError> {
    get(key).ok_or_else(|| EnvError::NotSet {
        key: key.to_string(),
    })
}

/// Get an environment variable or panic.
///
/// Intended for startup code where a missing variable is fatal.
///
/// # Panics
///
/// Panics when `key` is not set.
pub fn must_get(key: &str) -> String {
    match get(key) {
        Some(value) => value,
        None => panic!("expected environment variable \"{key}\" does not exist"),
    }
}

/// Set an environment variable.
pub fn set(key: &str, value: &str) -> Result<(), EnvError> {
    ProcessEnv.write(key, value)
}

/// Unset an environment variable.
pub fn unset(key: &str) -> Result<(), EnvError> {
    ProcessEnv.delete(key)
}
