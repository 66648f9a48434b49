//! Store corruption. These only fire when key paths are declared inconsistently
//! (two key paths for the same field with different value types, or an
//! optional and a non-optional key path used interchangeably), never through
//! a consistent set of key paths, so they panic instead of returning an error.

use partial_core::{AnyKeyPath, short_type_name};

#[cold]
#[track_caller]
pub(crate) fn type_mismatch(key_path: &AnyKeyPath, expected: &str, found: &str) -> ! {
    panic!(
        "invariant violation: key path '{key_path}' expected a payload of type {}, but the store holds {}",
        short_type_name(expected),
        short_type_name(found),
    )
}

#[cold]
#[track_caller]
pub(crate) fn absent_on_required(key_path: &AnyKeyPath) -> ! {
    panic!(
        "invariant violation: non-optional key path '{key_path}' holds an explicit absence; \
         only optional key paths can be set to None"
    )
}
