use core::any::TypeId;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use bitflags::bitflags;

bitflags! {
    /// Flags describing how a key path was declared
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyPathFlags: u8 {
        /// An empty set of flags
        const EMPTY = 0;

        /// The field is declared as `Option<V>` on its record
        const OPTIONAL = 1 << 0;
    }
}

impl Default for KeyPathFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A key path with both its root and value types erased.
///
/// Identity is the pair (root type, field name): the optional and non-optional
/// flavors of the same field compare equal, and the value type only shows up
/// in diagnostics.
#[derive(Clone, Copy)]
pub struct AnyKeyPath {
    root: TypeId,
    root_name: &'static str,
    name: &'static str,
    value_name: &'static str,
    flags: KeyPathFlags,
}

impl AnyKeyPath {
    /// Creates the erased key for field `name` of root `W`, with value type `V`.
    pub fn new<W: 'static, V: 'static>(name: &'static str, flags: KeyPathFlags) -> Self {
        Self {
            root: TypeId::of::<W>(),
            root_name: core::any::type_name::<W>(),
            name,
            value_name: core::any::type_name::<V>(),
            flags,
        }
    }

    /// Name of the field
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `TypeId` of the record this key path is rooted at
    pub fn root_type_id(&self) -> TypeId {
        self.root
    }

    /// Fully qualified type name of the root record
    pub fn root_type_name(&self) -> &'static str {
        self.root_name
    }

    /// Fully qualified type name of the value (the `V` in `Option<V>` for optional paths)
    pub fn value_type_name(&self) -> &'static str {
        self.value_name
    }

    /// Flags this key path was declared with
    pub fn flags(&self) -> KeyPathFlags {
        self.flags
    }

    /// Whether the field is declared `Option<V>`
    pub fn is_optional(&self) -> bool {
        self.flags.contains(KeyPathFlags::OPTIONAL)
    }
}

/// Displays a type name with every module path stripped, leaving the rest of
/// the type's syntax alone: `&alloc::vec::Vec<alloc::string::String>` shows as
/// `&Vec<String>`, and `(u8, core::time::Duration)` as `(u8, Duration)`.
pub fn short_type_name(full: &str) -> ShortTypeName<'_> {
    ShortTypeName(full)
}

/// A type name shown without module paths, see [`short_type_name`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ShortTypeName<'a>(&'a str);

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ':'
}

impl fmt::Display for ShortTypeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while !rest.is_empty() {
            let path_end = rest.find(|c: char| !is_path_char(c)).unwrap_or(rest.len());
            let (path, tail) = rest.split_at(path_end);
            f.write_str(path.rsplit("::").next().unwrap_or(path))?;

            let punct_end = tail.find(is_path_char).unwrap_or(tail.len());
            let (punct, tail) = tail.split_at(punct_end);
            f.write_str(punct)?;
            rest = tail;
        }
        Ok(())
    }
}

impl fmt::Debug for ShortTypeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl PartialEq for AnyKeyPath {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.name == other.name
    }
}

impl Eq for AnyKeyPath {}

impl Hash for AnyKeyPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root.hash(state);
        self.name.hash(state);
    }
}

impl PartialOrd for AnyKeyPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AnyKeyPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.root
            .cmp(&other.root)
            .then_with(|| self.name.cmp(other.name))
    }
}

impl fmt::Display for AnyKeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", short_type_name(self.root_name), self.name)
    }
}

impl fmt::Debug for AnyKeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: ", short_type_name(self.root_name), self.name)?;
        if self.is_optional() {
            write!(f, "Option<{}>", short_type_name(self.value_name))
        } else {
            write!(f, "{}", short_type_name(self.value_name))
        }
    }
}
