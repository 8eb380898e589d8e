//! Error types for populating records from environment variables

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

/// Errors returned by the population entry points.
///
/// Structural problems abort immediately. Per-field problems are collected
/// across the whole record and reported together as [`Error::Fields`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The value handed to the entry point does not reference a record
    /// (for example an `Option<Box<Config>>` that is `None`).
    ///
    /// No field is resolved when this is returned.
    #[error("expected a mutable reference to a record")]
    NotAStructPtr,

    /// One or more fields failed to resolve or convert.
    ///
    /// Errors are kept in field declaration order. The message is every field
    /// message joined by `". "`.
    #[error("{}", FieldErrors(.0))]
    Fields(Vec<FieldError>),
}

impl Error {
    /// Field-level errors carried by this error, empty for structural errors.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Fields(errors) => errors,
            Self::NotAStructPtr => &[],
        }
    }
}

struct FieldErrors<'a>(&'a [FieldError]);

impl fmt::Display for FieldErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(". ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// A failure scoped to a single field of a record.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// A `required` field's key is absent from the environment.
    ///
    /// Cites the declared key, without any prefix.
    #[error("required environment variable \"{key}\" is not set")]
    RequiredNotSet {
        /// Declared environment key
        key: String,
    },

    /// The field carries an option token other than `required`.
    #[error("env option \"{option}\" on field `{field}` is not supported")]
    UnrecognizedOption {
        /// Rust field name
        field: &'static str,
        /// The offending option token
        option: String,
    },

    /// No converter exists for the field's type.
    #[error("field `{field}` has unsupported type `{ty}`")]
    UnsupportedType {
        /// Rust field name
        field: &'static str,
        /// Declared type of the field
        ty: &'static str,
    },

    /// The field is a `Vec` whose element type has no converter.
    #[error("field `{field}` has unsupported sequence type `{ty}`")]
    UnsupportedSliceType {
        /// Rust field name
        field: &'static str,
        /// Declared type of the field
        ty: &'static str,
    },

    /// A built-in or text converter rejected the value.
    #[error("failed to parse environment variable \"{key}\" as `{ty}`: {source}")]
    Convert {
        /// Effective environment key (prefix included)
        key: String,
        /// Declared type of the field
        ty: &'static str,
        /// What was wrong with the value
        source: ConvertError,
    },

    /// A caller-supplied converter rejected the value.
    #[error("custom converter for environment variable \"{key}\" failed: {message}")]
    Custom {
        /// Effective environment key (prefix included)
        key: String,
        /// Display output of the converter's error
        message: String,
    },
}

/// Failure converting a raw string into a typed value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid boolean {value:?}")]
    Bool { value: String },

    #[error("invalid integer {value:?}: {source}")]
    Int {
        value: String,
        source: ParseIntError,
    },

    #[error("invalid float {value:?}: {source}")]
    Float {
        value: String,
        source: ParseFloatError,
    },

    #[error("float {value:?} is out of range")]
    FloatRange { value: String },

    #[error("invalid duration {value:?}: {reason}")]
    Duration { value: String, reason: &'static str },

    #[error("invalid URL {value:?}: {source}")]
    Url {
        value: String,
        source: url::ParseError,
    },

    /// A `FromStr` implementation rejected the value.
    #[error("invalid value {value:?}: {message}")]
    Text { value: String, message: String },

    /// An element of a sequence failed; the sequence is not assigned.
    #[error("element {index}: {source}")]
    Element {
        index: usize,
        source: Box<ConvertError>,
    },

    /// A converter produced a value of a different type than the field.
    #[error("converter produced a value of the wrong type")]
    TypeMismatch,
}

/// Errors from the environment accessor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    /// The variable is not present in the environment.
    #[error("environment variable \"{key}\" is not set")]
    NotSet {
        /// Name of the missing variable
        key: String,
    },

    /// The key is empty or contains `=` or NUL.
    #[error("invalid environment variable name {key:?}")]
    InvalidKey {
        /// The rejected key
        key: String,
    },

    /// The value contains NUL.
    #[error("invalid value for environment variable \"{key}\"")]
    InvalidValue {
        /// Name of the variable being written
        key: String,
    },
}
