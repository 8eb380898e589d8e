//! Sequence conversion: split a delimited value and convert every element

use crate::error::ConvertError;
use std::fmt::Display;
use std::str::FromStr;

/// Separator used when a field does not declare one.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Split `raw` on `separator`, keeping empty elements.
///
/// An empty separator means [`DEFAULT_SEPARATOR`].
pub fn split<'a>(raw: &'a str, separator: &str) -> Vec<&'a str> {
    let separator = if separator.is_empty() {
        DEFAULT_SEPARATOR
    } else {
        separator
    };
    raw.split(separator).collect()
}

/// Convert every element with `convert`, stopping at the first failure.
pub fn each<T>(
    parts: &[&str],
    convert: impl Fn(&str) -> Result<T, ConvertError>,
) -> Result<Vec<T>, ConvertError> {
    parts
        .iter()
        .enumerate()
        .map(|(index, part)| {
            convert(part).map_err(|source| ConvertError::Element {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

pub(crate) fn decode_text<T>(raw: &str) -> Result<T, ConvertError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|e| ConvertError::Text {
        value: raw.to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn decode_values<E>(raw: &str, separator: &str) -> Result<Vec<E>, ConvertError>
where
    E: FromStr,
    E::Err: Display,
{
    each(&split(raw, separator), decode_text::<E>)
}

pub(crate) fn decode_boxes<E>(raw: &str, separator: &str) -> Result<Vec<Box<E>>, ConvertError>
where
    E: FromStr,
    E::Err: Display,
{
    each(&split(raw, separator), |part| decode_text::<E>(part).map(Box::new))
}
