#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod key_path;
pub use key_path::*;

mod any_key_path;
pub use any_key_path::*;

/// Types that can be stored as a field payload in a partial value.
///
/// Payloads live in a type-erased store that must be cloneable and shareable
/// across threads, hence the bounds. Implemented for every type that satisfies
/// them.
pub trait FieldValue: core::any::Any + Clone + Send + Sync {}

impl<T> FieldValue for T where T: core::any::Any + Clone + Send + Sync {}
