//! The partial value container and its accessors.
//!
//! # Overview
//!
//! A [`Partial<W>`] mirrors every field of `W`, where each field is in one of
//! these states:
//!
//! - **unset**: nothing was recorded; reads fall back to the backing value, if any
//! - **value**: a concrete value of the field's type
//! - **nested**: a `Partial` of the field's type, built into a value on read
//! - **absent**: explicitly `None`, only for fields declared `Option<V>`
//!
//! Absent is distinct from unset: an absent field reads as `None` even when
//! the backing value has `Some` there.
//!
//! # Access shapes
//!
//! | | `KeyPath<W, V>` | `OptionalKeyPath<W, V>` |
//! |---|---|---|
//! | read | [`value`](Partial::value) | [`optional_value`](Partial::optional_value) |
//! | derive a nested partial | [`partial_value`](Partial::partial_value) | [`optional_partial_value`](Partial::optional_partial_value) |
//! | edit a nested partial in place | [`partial_value_mut`](Partial::partial_value_mut) | [`optional_partial_value_mut`](Partial::optional_partial_value_mut) |
//! | write a value | [`set_value`](Partial::set_value) | [`set_optional_value`](Partial::set_optional_value) |
//! | write a nested partial | [`set_partial`](Partial::set_partial) | [`set_optional_partial`](Partial::set_optional_partial) |
//! | clear | [`remove_value`](Partial::remove_value) | [`remove_value`](Partial::remove_value) |
//!
//! Reads of a nested entry rebuild the nested value every time, so they always
//! reflect the latest edits made to it.


use alloc::borrow::Cow;
use alloc::sync::Arc;
use core::fmt;

use partial_core::{AnyKeyPath, FieldValue, KeyPath, KeyPathOf, OptionalKeyPath};

use crate::store::{Entry, FieldStore};
use crate::{PartialConvertible, PartialError, invariant, trace};

/// An incomplete `W`, filled in one field at a time.
///
/// Cloning a partial is cheap for the backing value (it is shared behind an
/// `Arc`, and never mutated) and clones every stored entry, so each clone can
/// be edited independently.
pub struct Partial<W> {
    /// Field entries recorded on this partial
    store: FieldStore,

    /// Complete record that unset fields read through to
    backing: Option<Arc<W>>,
}

impl<W> Partial<W> {
    /// Creates an empty partial with no backing value: every field is unset.
    pub fn new() -> Self {
        Self {
            store: FieldStore::new(),
            backing: None,
        }
    }

    /// Creates a partial that reads every unset field from `backing`.
    pub fn with_backing(backing: W) -> Self {
        Self::with_shared_backing(Arc::new(backing))
    }

    /// Like [`with_backing`](Self::with_backing), for a record that is
    /// already shared.
    pub fn with_shared_backing(backing: Arc<W>) -> Self {
        Self {
            store: FieldStore::new(),
            backing: Some(backing),
        }
    }

    /// The backing value, if this partial has one
    pub fn backing_value(&self) -> Option<&W> {
        self.backing.as_deref()
    }

    /// Number of fields that are set (to a value, a nested partial, or absent)
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no field has been set. A partial with a backing value can be
    /// empty and still build successfully.
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Key paths that are currently set, in a stable but unspecified order.
    pub fn set_key_paths(&self) -> impl Iterator<Item = &AnyKeyPath> {
        self.store.keys()
    }

    /// Whether the field has been set on this partial. The backing value is
    /// not consulted.
    pub fn is_set(&self, key_path: &impl KeyPathOf<W>) -> bool {
        self.store.contains(&key_path.key())
    }

    /// Whether the field has been explicitly set to absent.
    pub fn is_absent(&self, key_path: &impl KeyPathOf<W>) -> bool {
        matches!(self.store.get(&key_path.key()), Some(Entry::Absent))
    }

    /// Clears a field back to unset, whatever it held. If there is a backing
    /// value, it governs this field again.
    pub fn remove_value(&mut self, key_path: &impl KeyPathOf<W>) -> &mut Self {
        self.store.remove(&key_path.key());
        self
    }
}

impl<W: 'static> Partial<W> {
    /// Sets a non-optional field to a value, replacing whatever it held.
    pub fn set_value<V: FieldValue>(&mut self, key_path: &KeyPath<W, V>, value: V) -> &mut Self {
        self.store.set_value(key_path.erased(), value);
        self
    }

    /// Sets an optional field. `None` records an explicit absence, which
    /// overrides the backing value instead of falling through to it.
    pub fn set_optional_value<V: FieldValue>(
        &mut self,
        key_path: &OptionalKeyPath<W, V>,
        value: Option<V>,
    ) -> &mut Self {
        match value {
            Some(value) => self.store.set_value(key_path.erased(), value),
            None => self.store.set_absent(key_path.erased()),
        }
        self
    }

    /// Sets a non-optional field to a nested partial, which is built into a
    /// `V` whenever the field is read.
    pub fn set_partial<V: PartialConvertible>(
        &mut self,
        key_path: &KeyPath<W, V>,
        partial: Partial<V>,
    ) -> &mut Self {
        self.store.set_partial(key_path.erased(), partial);
        self
    }

    /// Sets an optional field to a nested partial.
    pub fn set_optional_partial<V: PartialConvertible>(
        &mut self,
        key_path: &OptionalKeyPath<W, V>,
        partial: Partial<V>,
    ) -> &mut Self {
        self.store.set_partial(key_path.erased(), partial);
        self
    }

    /// Reads a non-optional field.
    ///
    /// A nested partial is built into a `V`, and its failure is returned
    /// unchanged. An unset field reads from the backing value, or fails with
    /// [`PartialError::KeyPathNotSet`] when there is none.
    ///
    /// # Panics
    ///
    /// If the stored entry does not match the key path: a payload of another
    /// type, or an explicit absence. Neither can be produced by a consistent
    /// set of key paths.
    pub fn value<V: FieldValue>(&self, key_path: &KeyPath<W, V>) -> Result<V, PartialError> {
        let key = key_path.erased();
        match self.store.get(&key) {
            Some(entry) => read_entry::<V>(&key, entry)
                .unwrap_or_else(|| invariant::absent_on_required(&key)),
            None => match self.backing.as_deref() {
                Some(backing) => {
                    trace!("Reading {key} from the backing value");
                    Ok(key_path.get(backing).clone())
                }
                None => Err(PartialError::KeyPathNotSet { key_path: key }),
            },
        }
    }

    /// Reads an optional field.
    ///
    /// Same as [`value`](Self::value), except that an explicit absence reads
    /// as `Ok(None)` without looking at the backing value.
    ///
    /// # Panics
    ///
    /// If the stored payload is not a `V`.
    pub fn optional_value<V: FieldValue>(
        &self,
        key_path: &OptionalKeyPath<W, V>,
    ) -> Result<Option<V>, PartialError> {
        let key = key_path.erased();
        match self.store.get(&key) {
            Some(entry) => read_entry::<V>(&key, entry).transpose(),
            None => match self.backing.as_deref() {
                Some(backing) => {
                    trace!("Reading {key} from the backing value");
                    Ok(key_path.get(backing).clone())
                }
                None => Err(PartialError::KeyPathNotSet { key_path: key }),
            },
        }
    }

    /// Derives a partial for a non-optional field. Never fails.
    ///
    /// - a nested partial is returned as is, borrowed
    /// - a value, or the backing value's field when unset, becomes the backing
    ///   value of a fresh partial, so its fields read through but can be
    ///   overridden
    /// - an unset field without a backing value gives an empty partial
    ///
    /// # Panics
    ///
    /// Under the same store corruption as [`value`](Self::value).
    pub fn partial_value<V: FieldValue>(&self, key_path: &KeyPath<W, V>) -> Cow<'_, Partial<V>> {
        let key = key_path.erased();
        match self.store.get(&key) {
            Some(Entry::Absent) => invariant::absent_on_required(&key),
            Some(entry) => derive_from_entry(&key, entry),
            None => match self.backing.as_deref() {
                Some(backing) => Cow::Owned(Partial::with_backing(key_path.get(backing).clone())),
                None => Cow::Owned(Partial::new()),
            },
        }
    }

    /// Derives a partial for an optional field. Never fails.
    ///
    /// Like [`partial_value`](Self::partial_value); an explicit absence, or a
    /// backing value holding `None`, gives an empty partial.
    pub fn optional_partial_value<V: FieldValue>(
        &self,
        key_path: &OptionalKeyPath<W, V>,
    ) -> Cow<'_, Partial<V>> {
        let key = key_path.erased();
        match self.store.get(&key) {
            Some(Entry::Absent) => Cow::Owned(Partial::new()),
            Some(entry) => derive_from_entry(&key, entry),
            None => match self.backing.as_deref().and_then(|b| key_path.get(b).as_ref()) {
                Some(value) => Cow::Owned(Partial::with_backing(value.clone())),
                None => Cow::Owned(Partial::new()),
            },
        }
    }

    /// Gives mutable access to a non-optional field as a nested partial.
    ///
    /// Unless the field already holds a nested partial, the partial derived by
    /// [`partial_value`](Self::partial_value) is stored first, so edits made
    /// through the returned reference are part of this partial.
    pub fn partial_value_mut<V: PartialConvertible>(
        &mut self,
        key_path: &KeyPath<W, V>,
    ) -> &mut Partial<V> {
        let key = key_path.erased();
        if !matches!(self.store.get(&key), Some(Entry::Partial { .. })) {
            let derived = self.partial_value(key_path).into_owned();
            self.store.set_partial(key, derived);
        }
        self.nested_mut(&key)
    }

    /// Gives mutable access to an optional field as a nested partial.
    ///
    /// An absent field becomes an empty nested partial, i.e. no longer absent.
    pub fn optional_partial_value_mut<V: PartialConvertible>(
        &mut self,
        key_path: &OptionalKeyPath<W, V>,
    ) -> &mut Partial<V> {
        let key = key_path.erased();
        if !matches!(self.store.get(&key), Some(Entry::Partial { .. })) {
            let derived = self.optional_partial_value(key_path).into_owned();
            self.store.set_partial(key, derived);
        }
        self.nested_mut(&key)
    }

    fn nested_mut<V: PartialConvertible>(&mut self, key: &AnyKeyPath) -> &mut Partial<V> {
        match self.store.get_mut(key) {
            Some(Entry::Partial { partial, .. }) => partial.expect_mut::<Partial<V>>(key),
            _ => unreachable!("a nested partial was just stored at {key}"),
        }
    }
}

impl<W: PartialConvertible> Partial<W> {
    /// Attempts to build a complete `W`.
    ///
    /// This is a plain read: the partial is left as it was, and can be edited
    /// and built again.
    pub fn build(&self) -> Result<W, PartialError> {
        trace!("Building {}", core::any::type_name::<W>());
        W::from_partial(self)
    }
}

/// Reads a value out of a set entry. `None` means the entry is absent.
fn read_entry<V: FieldValue>(key: &AnyKeyPath, entry: &Entry) -> Option<Result<V, PartialError>> {
    match entry {
        Entry::Value(payload) => Some(Ok(payload.expect_ref::<V>(key).clone())),
        Entry::Partial {
            partial,
            materialize,
        } => Some(materialize(partial.as_any()).map(|value| match value.downcast::<V>() {
            Ok(value) => *value,
            Err(_) => invariant::type_mismatch(
                key,
                core::any::type_name::<V>(),
                partial.type_name(),
            ),
        })),
        Entry::Absent => None,
    }
}

/// Derives a partial from a value or nested entry.
fn derive_from_entry<'a, V: FieldValue>(key: &AnyKeyPath, entry: &'a Entry) -> Cow<'a, Partial<V>> {
    match entry {
        Entry::Value(payload) => Cow::Owned(Partial::with_backing(
            payload.expect_ref::<V>(key).clone(),
        )),
        Entry::Partial { partial, .. } => Cow::Borrowed(partial.expect_ref::<Partial<V>>(key)),
        Entry::Absent => Cow::Owned(Partial::new()),
    }
}

impl<W> Default for Partial<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Clone for Partial<W> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            backing: self.backing.clone(),
        }
    }
}

impl<W> From<W> for Partial<W> {
    fn from(backing: W) -> Self {
        Self::with_backing(backing)
    }
}

impl<W> fmt::Debug for Partial<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Fields<'a>(&'a FieldStore);

        impl fmt::Debug for Fields<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(self.0.iter().map(|(key, entry)| (key.name(), entry)))
                    .finish()
            }
        }

        f.debug_struct("Partial")
            .field("type", &partial_core::short_type_name(core::any::type_name::<W>()))
            .field("fields", &Fields(&self.store))
            .field("backed", &self.backing.is_some())
            .finish()
    }
}
