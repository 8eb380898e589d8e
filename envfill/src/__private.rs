//! Support for macro-generated code. Not public API.
//!
//! `#[derive(EnvFill)]` picks a [`Decode`] for each field's concrete type
//! with method resolution on stacked references: the most specific trait whose
//! impl applies at the shallowest autoderef step wins.
//!
//! | impl for        | applies to                  | decoder            |
//! |-----------------|-----------------------------|--------------------|
//! | `&&&&&Probe<T>` | `T: FromStr`                | `Decode::text`     |
//! | `&&&&Probe<T>`  | `Vec<E>`, `E: FromStr`      | `Decode::values`   |
//! | `&&&Probe<T>`   | `Vec<Box<E>>`, `E: FromStr` | `Decode::boxes`    |
//! | `&&Probe<T>`    | `Option<E>`, `E: FromStr`   | `Decode::optional` |
//! | `&Probe<T>`     | any other `Vec<E>`          | unsupported (seq)  |
//! | `Probe<T>`      | anything else               | unsupported        |

use crate::record::Decode;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

pub struct Probe<T>(PhantomData<fn() -> T>);

impl<T> Probe<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

pub trait ViaText {
    type Target;
    fn decoder(&self) -> Decode<Self::Target>;
}

impl<T> ViaText for &&&&&Probe<T>
where
    T: FromStr,
    T::Err: Display,
{
    type Target = T;
    fn decoder(&self) -> Decode<T> {
        Decode::text()
    }
}

pub trait ViaValues {
    type Target;
    fn decoder(&self) -> Decode<Self::Target>;
}

impl<E> ViaValues for &&&&Probe<Vec<E>>
where
    E: FromStr,
    E::Err: Display,
{
    type Target = Vec<E>;
    fn decoder(&self) -> Decode<Vec<E>> {
        Decode::values()
    }
}

pub trait ViaBoxes {
    type Target;
    fn decoder(&self) -> Decode<Self::Target>;
}

impl<E> ViaBoxes for &&&Probe<Vec<Box<E>>>
where
    E: FromStr,
    E::Err: Display,
{
    type Target = Vec<Box<E>>;
    fn decoder(&self) -> Decode<Vec<Box<E>>> {
        Decode::boxes()
    }
}

pub trait ViaOption {
    type Target;
    fn decoder(&self) -> Decode<Self::Target>;
}

impl<E> ViaOption for &&Probe<Option<E>>
where
    E: FromStr,
    E::Err: Display,
{
    type Target = Option<E>;
    fn decoder(&self) -> Decode<Option<E>> {
        Decode::optional()
    }
}

pub trait ViaSeq {
    type Target;
    fn decoder(&self) -> Decode<Self::Target>;
}

impl<E> ViaSeq for &Probe<Vec<E>> {
    type Target = Vec<E>;
    fn decoder(&self) -> Decode<Vec<E>> {
        Decode::Unsupported { sequence: true }
    }
}

pub trait ViaNone {
    type Target;
    fn decoder(&self) -> Decode<Self::Target>;
}

impl<T> ViaNone for Probe<T> {
    type Target = T;
    fn decoder(&self) -> Decode<T> {
        Decode::Unsupported { sequence: false }
    }
}

/// Decoder for a concrete field type.
///
/// Expands to a method call on `&&&&&&Probe::<T>` with every probe trait in
/// scope.
#[macro_export]
#[doc(hidden)]
macro_rules! __decoder {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::__private::{
            ViaBoxes as _, ViaNone as _, ViaOption as _, ViaSeq as _, ViaText as _,
            ViaValues as _,
        };
        (&&&&&&$crate::__private::Probe::<$ty>::new()).decoder()
    }};
}
