#![cfg(feature = "std")]

mod auto_traits;
mod backing;
mod optional_nested;
mod scenario;
