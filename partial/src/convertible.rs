use partial_core::FieldValue;

use crate::{Partial, PartialError};

/// A record that can build itself from a [`Partial`] of itself.
///
/// This is what lets nested partials unwrap: reading a field that holds a
/// `Partial<V>` calls `V::from_partial`, which reads `V`'s own fields, and so
/// on down. Implementations should read fields with [`Partial::value`] and
/// [`Partial::optional_value`] and pass errors through with `?`, so that a
/// failure deep inside a nested record reaches the caller naming the field
/// that is actually missing.
///
/// The [`record!`](crate::record) macro writes this impl for plain structs.
///
/// ```
/// use partial::{KeyPath, Partial, PartialConvertible, PartialError};
///
/// #[derive(Clone)]
/// struct Span {
///     start: usize,
///     end: usize,
/// }
///
/// impl Span {
///     const START: KeyPath<Span, usize> = KeyPath::new("start", |s: &Span| &s.start);
///     const END: KeyPath<Span, usize> = KeyPath::new("end", |s: &Span| &s.end);
/// }
///
/// impl PartialConvertible for Span {
///     fn from_partial(partial: &Partial<Self>) -> Result<Self, PartialError> {
///         Ok(Span {
///             start: partial.value(&Self::START)?,
///             end: partial.value(&Self::END)?,
///         })
///     }
/// }
///
/// let mut span = Partial::<Span>::new();
/// span.set_value(&Span::START, 4);
/// assert!(span.build().is_err());
/// span.set_value(&Span::END, 9);
/// assert_eq!(span.build().unwrap().end, 9);
/// ```
pub trait PartialConvertible: FieldValue {
    /// Builds `Self` from the fields recorded in `partial`.
    fn from_partial(partial: &Partial<Self>) -> Result<Self, PartialError>;
}
