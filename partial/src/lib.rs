#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

pub use partial_core::*;

mod error;
pub use error::*;

mod invariant;

mod store;

mod partial;
pub use partial::*;

mod convertible;
pub use convertible::*;

mod macros;

#[cfg(feature = "log")]
#[allow(unused_imports)]
pub(crate) use log::trace;

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "log"))]
pub(crate) use trace;
