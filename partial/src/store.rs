//! Type-erased storage of field entries, keyed by [`AnyKeyPath`].

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::any::Any;
use core::fmt;

use partial_core::{AnyKeyPath, FieldValue, short_type_name};

use crate::{Partial, PartialConvertible, PartialError, invariant, trace};

/// Object-safe view of a [`FieldValue`], so boxed payloads can be cloned and
/// downcast without knowing their type.
trait ErasedValue: Any + Send + Sync {
    fn clone_erased(&self) -> Box<dyn ErasedValue>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: FieldValue> ErasedValue for T {
    fn clone_erased(&self) -> Box<dyn ErasedValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

/// A boxed, type-erased field payload
pub(crate) struct Payload(Box<dyn ErasedValue>);

impl Payload {
    fn new<T: FieldValue>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.0.as_ref().type_name()
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        self.0.as_ref().as_any()
    }

    /// Downcasts the payload, treating a type mismatch as store corruption.
    #[track_caller]
    pub(crate) fn expect_ref<T: FieldValue>(&self, key_path: &AnyKeyPath) -> &T {
        match self.as_any().downcast_ref::<T>() {
            Some(value) => value,
            None => invariant::type_mismatch(
                key_path,
                core::any::type_name::<T>(),
                self.type_name(),
            ),
        }
    }

    #[track_caller]
    pub(crate) fn expect_mut<T: FieldValue>(&mut self, key_path: &AnyKeyPath) -> &mut T {
        let found = self.type_name();
        match self.0.as_mut().as_any_mut().downcast_mut::<T>() {
            Some(value) => value,
            None => invariant::type_mismatch(key_path, core::any::type_name::<T>(), found),
        }
    }
}

impl Clone for Payload {
    fn clone(&self) -> Self {
        Self(self.0.as_ref().clone_erased())
    }
}

/// Materializes the concrete value from an erased nested partial.
pub(crate) type MaterializeFn = fn(&dyn Any) -> Result<Box<dyn Any>, PartialError>;

fn materialize<V: PartialConvertible>(partial: &dyn Any) -> Result<Box<dyn Any>, PartialError> {
    let Some(partial) = partial.downcast_ref::<Partial<V>>() else {
        unreachable!("materialize is only ever paired with a Partial<V> payload")
    };
    trace!("Materializing nested {}", core::any::type_name::<V>());
    let value = V::from_partial(partial)?;
    Ok(Box::new(value))
}

/// What a set key path holds
#[derive(Clone)]
pub(crate) enum Entry {
    /// A concrete value of the key path's value type
    Value(Payload),

    /// A nested `Partial<V>`, plus the function that knows how to build a `V` from it
    Partial {
        partial: Payload,
        materialize: MaterializeFn,
    },

    /// Explicitly set to `None` (optional key paths only)
    Absent,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Value(payload) => write!(f, "Value({})", short_type_name(payload.type_name())),
            Entry::Partial { partial, .. } => {
                write!(f, "Nested({})", short_type_name(partial.type_name()))
            }
            Entry::Absent => write!(f, "Absent"),
        }
    }
}

/// Entries by key path. A key path missing from the map is unset.
#[derive(Clone, Default)]
pub(crate) struct FieldStore {
    entries: BTreeMap<AnyKeyPath, Entry>,
}

impl FieldStore {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn get(&self, key_path: &AnyKeyPath) -> Option<&Entry> {
        self.entries.get(key_path)
    }

    pub(crate) fn get_mut(&mut self, key_path: &AnyKeyPath) -> Option<&mut Entry> {
        self.entries.get_mut(key_path)
    }

    pub(crate) fn set_value<V: FieldValue>(&mut self, key_path: AnyKeyPath, value: V) {
        trace!("Setting {key_path} to a {}", core::any::type_name::<V>());
        self.entries.insert(key_path, Entry::Value(Payload::new(value)));
    }

    pub(crate) fn set_absent(&mut self, key_path: AnyKeyPath) {
        trace!("Setting {key_path} to explicitly absent");
        self.entries.insert(key_path, Entry::Absent);
    }

    pub(crate) fn set_partial<V: PartialConvertible>(
        &mut self,
        key_path: AnyKeyPath,
        partial: Partial<V>,
    ) {
        trace!("Setting {key_path} to a nested partial");
        self.entries.insert(
            key_path,
            Entry::Partial {
                partial: Payload::new(partial),
                materialize: materialize::<V>,
            },
        );
    }

    pub(crate) fn remove(&mut self, key_path: &AnyKeyPath) -> Option<Entry> {
        trace!("Removing {key_path}");
        self.entries.remove(key_path)
    }

    pub(crate) fn contains(&self, key_path: &AnyKeyPath) -> bool {
        self.entries.contains_key(key_path)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &AnyKeyPath> {
        self.entries.keys()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&AnyKeyPath, &Entry)> {
        self.entries.iter()
    }
}
