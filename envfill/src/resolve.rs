//! Field resolution: from a descriptor to the raw string to convert

use crate::env::Store;
use crate::error::FieldError;
use crate::expand::expand;
use crate::record::{FieldDescriptor, REQUIRED};

/// Raw value resolved for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Effective key: prefix followed by the declared key
    pub key: String,
    /// Raw value; empty means the field is left unchanged
    pub value: String,
}

/// Resolve the raw value of `field` under `prefix`.
///
/// 1. Read the effective key, falling back to the default literal.
/// 2. With expansion enabled, expand `$VAR` references in that value.
/// 3. With `required`, the key must be set (possibly to the empty string).
///    Its value replaces the one above as read, without expansion, even if
///    a default is declared.
///
/// Empty option tokens are ignored; any token other than `required` is an
/// error. The first failing option decides the error.
pub fn resolve(
    field: &FieldDescriptor,
    prefix: &str,
    store: &dyn Store,
) -> Result<Resolved, FieldError> {
    let key = format!("{prefix}{}", field.key);

    let mut value = store
        .read(&key)
        .or_else(|| field.default.map(str::to_string))
        .unwrap_or_default();

    if field.expand {
        value = expand(&value, store);
    }

    for option in field.options {
        match *option {
            "" => {}
            REQUIRED => {
                value = store.read(&key).ok_or_else(|| FieldError::RequiredNotSet {
                    key: field.key.to_string(),
                })?;
            }
            other => {
                return Err(FieldError::UnrecognizedOption {
                    field: field.field,
                    option: other.to_string(),
                });
            }
        }
    }

    Ok(Resolved { key, value })
}
