//! Population engine and its entry points

use crate::convert::{Converters, Registry};
use crate::env::{ProcessEnv, Store};
use crate::error::{Error, FieldError};
use crate::record::{FieldDescriptor, FieldTarget, Record, RecordRef, Slot};
use crate::resolve::resolve;

type OnSet<'a> = dyn Fn(&FieldDescriptor, &str) + 'a;

/// Configuration for one parse call.
///
/// ```rust
/// use envfill::{Converters, MapStore, Options};
///
/// let store: MapStore = [("APP_PORT", "8080")].into_iter().collect();
/// let options = Options::new()
///     .prefix("APP_")
///     .converters(Converters::new())
///     .store(&store)
///     .on_set(|field, raw| println!("{} = {raw}", field.key));
/// # let _ = options;
/// ```
pub struct Options<'a> {
    prefix: String,
    converters: Converters,
    store: &'a dyn Store,
    on_set: Option<Box<OnSet<'a>>>,
}

impl Default for Options<'_> {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            converters: Converters::new(),
            store: &ProcessEnv,
            on_set: None,
        }
    }
}

impl<'a> Options<'a> {
    /// Options reading the process environment with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every key, nested records included.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Converters that take precedence over the built-in ones.
    pub fn converters(mut self, converters: Converters) -> Self {
        self.converters = converters;
        self
    }

    /// Read variables from `store` instead of the process environment.
    pub fn store(mut self, store: &'a dyn Store) -> Self {
        self.store = store;
        self
    }

    /// Call `hook` after each field is set, with the raw value used.
    pub fn on_set(mut self, hook: impl Fn(&FieldDescriptor, &str) + 'a) -> Self {
        self.on_set = Some(Box::new(hook));
        self
    }
}

/// Populate `record` from the environment.
///
/// Fields whose variable is not set and that have no default keep their
/// current value.
pub fn parse<R: RecordRef + ?Sized>(record: &mut R) -> Result<(), Error> {
    parse_with_options(record, &Options::new())
}

/// Populate `record`, prepending `prefix` to every key.
pub fn parse_with_prefix<R: RecordRef + ?Sized>(record: &mut R, prefix: &str) -> Result<(), Error> {
    parse_with_options(record, &Options::new().prefix(prefix))
}

/// Populate `record` with caller-supplied converters.
pub fn parse_with_funcs<R: RecordRef + ?Sized>(
    record: &mut R,
    converters: Converters,
) -> Result<(), Error> {
    parse_with_options(record, &Options::new().converters(converters))
}

/// Populate `record` with a prefix and caller-supplied converters.
pub fn parse_with_prefix_funcs<R: RecordRef + ?Sized>(
    record: &mut R,
    prefix: &str,
    converters: Converters,
) -> Result<(), Error> {
    parse_with_options(record, &Options::new().prefix(prefix).converters(converters))
}

/// Populate `record` as configured by `options`.
///
/// # Errors
///
/// - [`Error::NotAStructPtr`] when `record` references no record; nothing is
///   read in that case.
/// - Any error from a nested record, returned as soon as it occurs.
/// - [`Error::Fields`] with every failed field of this record, after all
///   fields have been attempted.
pub fn parse_with_options<R: RecordRef + ?Sized>(
    record: &mut R,
    options: &Options<'_>,
) -> Result<(), Error> {
    let record = record.as_record().ok_or(Error::NotAStructPtr)?;
    populate(record, options)
}

pub(crate) fn populate(record: &mut dyn Record, options: &Options<'_>) -> Result<(), Error> {
    let registry = Registry::new(&options.converters);
    let mut errors = Vec::new();

    for (index, field) in record.fields().iter().enumerate() {
        let target = match record.slot(index) {
            Some(Slot::Value(target)) => target,
            Some(Slot::Nested(Some(nested))) => {
                populate(nested, options)?;
                continue;
            }
            Some(Slot::Nested(None)) | None => continue,
        };

        if let Err(e) = set_field(&registry, target, field, options) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(errors = errors.len(), "failed to populate record");
        Err(Error::Fields(errors))
    }
}

fn set_field(
    registry: &Registry<'_>,
    mut target: Box<dyn FieldTarget + '_>,
    field: &FieldDescriptor,
    options: &Options<'_>,
) -> Result<(), FieldError> {
    let resolved = resolve(field, &options.prefix, options.store)?;
    if resolved.value.is_empty() {
        tracing::trace!(field = field.field, key = %resolved.key, "no value, field left unchanged");
        return Ok(());
    }

    registry.convert(target.as_mut(), field, &resolved.key, &resolved.value)?;
    tracing::debug!(field = field.field, key = %resolved.key, "populated field from environment");

    if let Some(hook) = &options.on_set {
        hook(field, &resolved.value);
    }
    Ok(())
}
