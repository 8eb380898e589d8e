//! Conversion registry: built-in converters and caller-supplied ones
//!
//! A field's raw value is converted by the first of:
//!
//! 1. a converter registered in [`Converters`] for the field's exact type,
//! 2. the built-in converter for a [`Kind`],
//! 3. the field's text decoder (`FromStr`).

use crate::duration::parse_duration;
use crate::error::{ConvertError, FieldError};
use crate::record::{FieldDescriptor, FieldTarget};
use crate::seq;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use crate::url_ref::UrlRef;
use std::time::Duration;

/// Scalar types with a built-in converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    String,
    Bool,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    Duration,
    Url,
}

/// Built-in conversion target: a scalar, a `Vec` of one or an `Option` of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Scalar(Scalar),
    Seq(Scalar),
    Optional(Scalar),
}

struct Builtin {
    scalar: TypeId,
    seq: TypeId,
    optional: TypeId,
    kind: Scalar,
}

impl Builtin {
    fn of<T: Any>(kind: Scalar) -> Self {
        Self {
            scalar: TypeId::of::<T>(),
            seq: TypeId::of::<Vec<T>>(),
            optional: TypeId::of::<Option<T>>(),
            kind,
        }
    }
}

fn builtin_table() -> [Builtin; 10] {
    [
        Builtin::of::<String>(Scalar::String),
        Builtin::of::<bool>(Scalar::Bool),
        Builtin::of::<i32>(Scalar::I32),
        Builtin::of::<i64>(Scalar::I64),
        Builtin::of::<u32>(Scalar::U32),
        Builtin::of::<u64>(Scalar::U64),
        Builtin::of::<f32>(Scalar::F32),
        Builtin::of::<f64>(Scalar::F64),
        Builtin::of::<Duration>(Scalar::Duration),
        Builtin::of::<UrlRef>(Scalar::Url),
    ]
}

impl Kind {
    /// The built-in kind for a type, if it has one.
    pub fn of(type_id: TypeId) -> Option<Self> {
        builtin_table().into_iter().find_map(|builtin| {
            if type_id == builtin.scalar {
                Some(Self::Scalar(builtin.kind))
            } else if type_id == builtin.seq {
                Some(Self::Seq(builtin.kind))
            } else if type_id == builtin.optional {
                Some(Self::Optional(builtin.kind))
            } else {
                None
            }
        })
    }

    /// Convert `raw` into a boxed value of this kind's type.
    pub fn convert(self, raw: &str, separator: &str) -> Result<Box<dyn Any>, ConvertError> {
        match self {
            Self::Scalar(scalar) => scalar.convert(raw),
            Self::Seq(scalar) => scalar.convert_all(&seq::split(raw, separator)),
            Self::Optional(scalar) => scalar.convert_some(raw),
        }
    }
}

impl Scalar {
    fn convert(self, raw: &str) -> Result<Box<dyn Any>, ConvertError> {
        let value: Box<dyn Any> = match self {
            Self::String => Box::new(raw.to_string()),
            Self::Bool => Box::new(parse_bool(raw)?),
            Self::I32 => Box::new(parse_int::<i32>(raw)?),
            Self::I64 => Box::new(parse_int::<i64>(raw)?),
            Self::U32 => Box::new(parse_int::<u32>(raw)?),
            Self::U64 => Box::new(parse_int::<u64>(raw)?),
            Self::F32 => Box::new(parse_f32(raw)?),
            Self::F64 => Box::new(parse_f64(raw)?),
            Self::Duration => Box::new(parse_duration(raw)?),
            Self::Url => Box::new(parse_url(raw)?),
        };
        Ok(value)
    }

    // Strings are a plain split; everything else converts per element.
    fn convert_all(self, parts: &[&str]) -> Result<Box<dyn Any>, ConvertError> {
        let values: Box<dyn Any> = match self {
            Self::String => Box::new(parts.iter().map(|part| part.to_string()).collect::<Vec<_>>()),
            Self::Bool => Box::new(seq::each(parts, parse_bool)?),
            Self::I32 => Box::new(seq::each(parts, parse_int::<i32>)?),
            Self::I64 => Box::new(seq::each(parts, parse_int::<i64>)?),
            Self::U32 => Box::new(seq::each(parts, parse_int::<u32>)?),
            Self::U64 => Box::new(seq::each(parts, parse_int::<u64>)?),
            Self::F32 => Box::new(seq::each(parts, parse_f32)?),
            Self::F64 => Box::new(seq::each(parts, parse_f64)?),
            Self::Duration => Box::new(seq::each(parts, parse_duration)?),
            Self::Url => Box::new(seq::each(parts, parse_url)?),
        };
        Ok(values)
    }

    fn convert_some(self, raw: &str) -> Result<Box<dyn Any>, ConvertError> {
        let value: Box<dyn Any> = match self {
            Self::String => Box::new(Some(raw.to_string())),
            Self::Bool => Box::new(Some(parse_bool(raw)?)),
            Self::I32 => Box::new(Some(parse_int::<i32>(raw)?)),
            Self::I64 => Box::new(Some(parse_int::<i64>(raw)?)),
            Self::U32 => Box::new(Some(parse_int::<u32>(raw)?)),
            Self::U64 => Box::new(Some(parse_int::<u64>(raw)?)),
            Self::F32 => Box::new(Some(parse_f32(raw)?)),
            Self::F64 => Box::new(Some(parse_f64(raw)?)),
            Self::Duration => Box::new(Some(parse_duration(raw)?)),
            Self::Url => Box::new(Some(parse_url(raw)?)),
        };
        Ok(value)
    }
}

/// Parse a boolean: `1 t T TRUE true True` or `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, ConvertError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConvertError::Bool {
            value: raw.to_string(),
        }),
    }
}

/// Parse a base-10 integer.
pub fn parse_int<T>(raw: &str) -> Result<T, ConvertError>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse::<T>().map_err(|source| ConvertError::Int {
        value: raw.to_string(),
        source,
    })
}

/// Parse a 64-bit float.
pub fn parse_f64(raw: &str) -> Result<f64, ConvertError> {
    raw.parse::<f64>().map_err(|source| ConvertError::Float {
        value: raw.to_string(),
        source,
    })
}

/// Parse a 32-bit float, rejecting finite literals that overflow it.
pub fn parse_f32(raw: &str) -> Result<f32, ConvertError> {
    let value = raw.parse::<f32>().map_err(|source| ConvertError::Float {
        value: raw.to_string(),
        source,
    })?;
    if value.is_infinite() && !raw.to_ascii_lowercase().contains("inf") {
        return Err(ConvertError::FloatRange {
            value: raw.to_string(),
        });
    }
    Ok(value)
}

/// Parse an absolute URL or a relative reference.
pub fn parse_url(raw: &str) -> Result<UrlRef, ConvertError> {
    UrlRef::parse(raw).map_err(|source| ConvertError::Url {
        value: raw.to_string(),
        source,
    })
}

type ConvertFn = dyn Fn(&str) -> Result<Box<dyn Any>, String> + Send + Sync;

/// Caller-supplied converters keyed by target type.
///
/// A converter registered for a type takes precedence over the built-in
/// conversion for that exact type. At most one converter is kept per type;
/// registering again replaces the previous one.
///
/// ```rust
/// use envfill::Converters;
///
/// #[derive(Debug, PartialEq)]
/// struct Level(u8);
///
/// let converters = Converters::new().with(|raw: &str| match raw {
///     "low" => Ok(Level(1)),
///     "high" => Ok(Level(9)),
///     other => Err(format!("unknown level {other}")),
/// });
/// assert_eq!(converters.len(), 1);
/// ```
#[derive(Default)]
pub struct Converters {
    converters: HashMap<TypeId, Box<ConvertFn>>,
}

impl Converters {
    /// An empty set of converters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `convert` for values of type `T`.
    pub fn register<T, E, F>(&mut self, convert: F) -> &mut Self
    where
        T: Any,
        E: fmt::Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let convert: Box<ConvertFn> = Box::new(move |raw: &str| {
            convert(raw)
                .map(|value| Box::new(value) as Box<dyn Any>)
                .map_err(|e| e.to_string())
        });
        self.converters.insert(TypeId::of::<T>(), convert);
        self
    }

    /// Builder form of [`Converters::register`].
    pub fn with<T, E, F>(mut self, convert: F) -> Self
    where
        T: Any,
        E: fmt::Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register(convert);
        self
    }

    /// Whether a converter is registered for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Whether no converter is registered.
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    fn get(&self, type_id: TypeId) -> Option<&ConvertFn> {
        self.converters.get(&type_id).map(|convert| &**convert)
    }
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converters")
            .field("len", &self.converters.len())
            .finish()
    }
}

/// The converters in effect for one parse call.
pub(crate) struct Registry<'a> {
    custom: &'a Converters,
}

impl<'a> Registry<'a> {
    pub(crate) fn new(custom: &'a Converters) -> Self {
        Self { custom }
    }

    /// Convert `raw` and write it into `target`.
    pub(crate) fn convert(
        &self,
        target: &mut dyn FieldTarget,
        field: &FieldDescriptor,
        key: &str,
        raw: &str,
    ) -> Result<(), FieldError> {
        let separator = field.separator();
        let type_id = target.value_type();

        let result = if let Some(custom) = self.custom.get(type_id) {
            let value = custom(raw).map_err(|message| FieldError::Custom {
                key: key.to_string(),
                message,
            })?;
            target.assign(value)
        } else if let Some(kind) = Kind::of(type_id) {
            kind.convert(raw, separator)
                .and_then(|value| target.assign(value))
        } else {
            match target.decode_text(raw, separator) {
                Some(result) => result,
                None if target.is_sequence() => {
                    return Err(FieldError::UnsupportedSliceType {
                        field: field.field,
                        ty: field.ty,
                    });
                }
                None => {
                    return Err(FieldError::UnsupportedType {
                        field: field.field,
                        ty: field.ty,
                    });
                }
            }
        };

        result.map_err(|source| FieldError::Convert {
            key: key.to_string(),
            ty: field.ty,
            source,
        })
    }
}
