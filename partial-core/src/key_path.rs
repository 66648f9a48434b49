use core::fmt;

use crate::{AnyKeyPath, KeyPathFlags};

/// Identifies a non-optional field of type `V` on a record of type `W`.
///
/// Key paths are plain data: a field name and a getter. They are usually
/// declared as associated constants next to the record they describe.
pub struct KeyPath<W, V> {
    name: &'static str,
    get: fn(&W) -> &V,
}

impl<W, V> KeyPath<W, V> {
    /// Creates a key path from the field's name and a function reading it.
    pub const fn new(name: &'static str, get: fn(&W) -> &V) -> Self {
        Self { name, get }
    }

    /// Name of the field this key path points at
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field from a complete record.
    #[inline]
    pub fn get<'w>(&self, root: &'w W) -> &'w V {
        (self.get)(root)
    }
}

impl<W: 'static, V: 'static> KeyPath<W, V> {
    /// Returns the erased identity of this key path.
    pub fn erased(&self) -> AnyKeyPath {
        AnyKeyPath::new::<W, V>(self.name, KeyPathFlags::EMPTY)
    }
}

/// Identifies a field declared as `Option<V>` on a record of type `W`.
///
/// The value type is the `V` inside the option: that is what gets stored when
/// the field is set, while an explicit `None` is recorded separately from
/// "never set".
pub struct OptionalKeyPath<W, V> {
    name: &'static str,
    get: fn(&W) -> &Option<V>,
}

impl<W, V> OptionalKeyPath<W, V> {
    /// Creates an optional key path from the field's name and a function reading it.
    pub const fn new(name: &'static str, get: fn(&W) -> &Option<V>) -> Self {
        Self { name, get }
    }

    /// Name of the field this key path points at
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field from a complete record.
    #[inline]
    pub fn get<'w>(&self, root: &'w W) -> &'w Option<V> {
        (self.get)(root)
    }
}

impl<W: 'static, V: 'static> OptionalKeyPath<W, V> {
    /// Returns the erased identity of this key path.
    pub fn erased(&self) -> AnyKeyPath {
        AnyKeyPath::new::<W, V>(self.name, KeyPathFlags::OPTIONAL)
    }
}

// Manual impls: deriving would put bounds on `W` and `V`, but only the
// function pointer is copied.
impl<W, V> Clone for KeyPath<W, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, V> Copy for KeyPath<W, V> {}

impl<W, V> Clone for OptionalKeyPath<W, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, V> Copy for OptionalKeyPath<W, V> {}

impl<W, V> fmt::Debug for KeyPath<W, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPath")
            .field("root", &core::any::type_name::<W>())
            .field("name", &self.name)
            .field("value", &core::any::type_name::<V>())
            .finish()
    }
}

impl<W, V> fmt::Debug for OptionalKeyPath<W, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalKeyPath")
            .field("root", &core::any::type_name::<W>())
            .field("name", &self.name)
            .field("value", &core::any::type_name::<V>())
            .finish()
    }
}

/// A key path rooted at `W`, whatever its value type or optionality.
///
/// Operations that only care about *which* field is meant, such as removing a
/// field from a partial value, accept any `KeyPathOf<W>`.
pub trait KeyPathOf<W> {
    /// The erased identity of the field
    fn key(&self) -> AnyKeyPath;
}

impl<W: 'static, V: 'static> KeyPathOf<W> for KeyPath<W, V> {
    fn key(&self) -> AnyKeyPath {
        self.erased()
    }
}

impl<W: 'static, V: 'static> KeyPathOf<W> for OptionalKeyPath<W, V> {
    fn key(&self) -> AnyKeyPath {
        self.erased()
    }
}
