//! Records, their field descriptors and the slots fields are written through
//!
//! `#[derive(EnvFill)]` implements [`Record`] and [`RecordRef`]. Hand-written
//! implementations are possible: list the descriptors in a `static` table and
//! return a [`Slot`] for each index.

use crate::error::{ConvertError, Error};
use crate::seq::{self, DEFAULT_SEPARATOR};
use std::any::{Any, TypeId};
use std::fmt::Display;
use std::str::FromStr;

/// Option token that makes a field's key mandatory.
pub const REQUIRED: &str = "required";

/// Static description of one field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust field name
    pub field: &'static str,
    /// Declared type, as written in the struct
    pub ty: &'static str,
    /// Environment key, without prefix
    pub key: &'static str,
    /// Option tokens following the key
    pub options: &'static [&'static str],
    /// Literal used when the key is not set
    pub default: Option<&'static str>,
    /// Expand `$VAR` and `${VAR}` in the resolved value
    pub expand: bool,
    /// Separator for sequence fields
    pub separator: Option<&'static str>,
}

impl FieldDescriptor {
    /// A descriptor with no options, default, expansion or separator.
    pub const fn new(field: &'static str, ty: &'static str, key: &'static str) -> Self {
        Self {
            field,
            ty,
            key,
            options: &[],
            default: None,
            expand: false,
            separator: None,
        }
    }

    /// Whether the `required` option is present.
    pub fn is_required(&self) -> bool {
        self.options.contains(&REQUIRED)
    }

    /// Separator for sequence fields, falling back to `,`.
    pub fn separator(&self) -> &'static str {
        match self.separator {
            Some(separator) if !separator.is_empty() => separator,
            _ => DEFAULT_SEPARATOR,
        }
    }
}

/// A structured record whose fields can be populated from the environment.
pub trait Record {
    /// Descriptors of the record's fields in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Slot for the field at `index` in [`Record::fields`].
    fn slot(&mut self, index: usize) -> Option<Slot<'_>>;

    /// Build a record from its `Default` value and populate it.
    fn from_env() -> Result<Self, Error>
    where
        Self: Default + Sized,
    {
        let mut record = Self::default();
        crate::parse::populate(&mut record, &crate::Options::new())?;
        Ok(record)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn fields(&self) -> &'static [FieldDescriptor] {
        (**self).fields()
    }

    fn slot(&mut self, index: usize) -> Option<Slot<'_>> {
        (**self).slot(index)
    }
}

/// A value that may reference a record.
///
/// Entry points and nested fields accept anything implementing this. `None`
/// means there is no record to populate.
pub trait RecordRef {
    /// The referenced record, if any.
    fn as_record(&mut self) -> Option<&mut dyn Record>;
}

impl RecordRef for dyn Record + '_ {
    fn as_record(&mut self) -> Option<&mut dyn Record> {
        Some(self)
    }
}

impl<R: Record> RecordRef for Box<R> {
    fn as_record(&mut self) -> Option<&mut dyn Record> {
        Some(&mut **self)
    }
}

impl<R: Record> RecordRef for Option<R> {
    fn as_record(&mut self) -> Option<&mut dyn Record> {
        self.as_mut().map(|record| record as &mut dyn Record)
    }
}

/// Access to one field of a record.
pub enum Slot<'a> {
    /// A field converted from a single environment value.
    Value(Box<dyn FieldTarget + 'a>),
    /// A nested record, `None` when absent.
    Nested(Option<&'a mut dyn Record>),
}

impl<'a> Slot<'a> {
    /// Slot for a value field.
    pub fn value<T: 'static>(value: &'a mut T, decode: Decode<T>) -> Self {
        Self::Value(Box::new(Target { value, decode }))
    }

    /// Slot for a nested record field.
    pub fn nested<R: RecordRef + ?Sized>(record: &'a mut R) -> Self {
        Self::Nested(record.as_record())
    }
}

/// Type-erased write access to a value field.
pub trait FieldTarget {
    /// `TypeId` of the field's type.
    fn value_type(&self) -> TypeId;

    /// Store an already converted value.
    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), ConvertError>;

    /// Decode `raw` through the field's text decoder.
    ///
    /// `None` when the type has no text decoder.
    fn decode_text(&mut self, raw: &str, separator: &str) -> Option<Result<(), ConvertError>>;

    /// Whether the field is a sequence, used to report unsupported types.
    fn is_sequence(&self) -> bool;
}

/// How a field's type decodes from text when no other converter applies.
pub enum Decode<T> {
    /// Decode with this function; the second argument is the separator.
    Text(fn(&str, &str) -> Result<T, ConvertError>),
    /// The type has no text decoder.
    Unsupported {
        /// The type is a `Vec` of an undecodable element
        sequence: bool,
    },
}

impl<T> Decode<T>
where
    T: FromStr,
    T::Err: Display,
{
    /// Decode through `FromStr`.
    pub fn text() -> Self {
        Self::Text(|raw, _| seq::decode_text::<T>(raw))
    }
}

impl<E> Decode<Vec<E>>
where
    E: FromStr,
    E::Err: Display,
{
    /// Split and decode every element through `FromStr`.
    pub fn values() -> Self {
        Self::Text(seq::decode_values::<E>)
    }
}

impl<E> Decode<Vec<Box<E>>>
where
    E: FromStr,
    E::Err: Display,
{
    /// Split and decode every element into a new box through `FromStr`.
    pub fn boxes() -> Self {
        Self::Text(seq::decode_boxes::<E>)
    }
}

impl<E> Decode<Option<E>>
where
    E: FromStr,
    E::Err: Display,
{
    /// Decode through `FromStr` into `Some`.
    pub fn optional() -> Self {
        Self::Text(|raw, _| seq::decode_text::<E>(raw).map(Some))
    }
}

struct Target<'a, T> {
    value: &'a mut T,
    decode: Decode<T>,
}

impl<T: 'static> FieldTarget for Target<'_, T> {
    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), ConvertError> {
        let value = value
            .downcast::<T>()
            .map_err(|_| ConvertError::TypeMismatch)?;
        *self.value = *value;
        Ok(())
    }

    fn decode_text(&mut self, raw: &str, separator: &str) -> Option<Result<(), ConvertError>> {
        match self.decode {
            Decode::Text(decode) => Some(decode(raw, separator).map(|value| *self.value = value)),
            Decode::Unsupported { .. } => None,
        }
    }

    fn is_sequence(&self) -> bool {
        matches!(self.decode, Decode::Unsupported { sequence: true })
    }
}
