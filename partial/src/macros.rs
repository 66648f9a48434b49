/// Declares key path constants for a struct and implements
/// [`PartialConvertible`](crate::PartialConvertible) for it.
///
/// Each line names the constant, the field, and the field's type. A field
/// typed `Option<T>` gets an [`OptionalKeyPath<_, T>`](crate::OptionalKeyPath),
/// anything else a [`KeyPath`](crate::KeyPath). Every field of the struct must
/// be listed, since the generated `from_partial` builds it with a struct
/// literal, reading the fields in the order given.
///
/// ```
/// use partial::{Partial, record};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Release {
///     version: String,
///     codename: Option<String>,
/// }
///
/// record! {
///     impl Release {
///         pub VERSION => version: String,
///         pub CODENAME => codename: Option<String>,
///     }
/// }
///
/// let mut release = Partial::<Release>::new();
/// release
///     .set_value(&Release::VERSION, "1.0.0".to_string())
///     .set_optional_value(&Release::CODENAME, None);
/// assert_eq!(
///     release.build().unwrap(),
///     Release { version: "1.0.0".to_string(), codename: None },
/// );
/// ```
///
/// The type must be named by a plain identifier; generic records need
/// hand-written key paths.
#[macro_export]
macro_rules! record {
    (impl $root:ident { $($body:tt)* }) => {
        // `partial` is threaded through the munching so every use shares one hygiene context
        $crate::record!(@munch partial $root [] [] $($body)*);
    };

    (@munch $p:ident $root:ident [$($consts:tt)*] [$($reads:tt)*]
        $vis:vis $konst:ident => $field:ident : Option<$inner:ty> $(, $($rest:tt)*)?
    ) => {
        $crate::record!(@munch $p $root
            [
                $($consts)*
                #[doc = concat!("Key path of `", stringify!($root), "::", stringify!($field), "`")]
                $vis const $konst: $crate::OptionalKeyPath<$root, $inner> =
                    $crate::OptionalKeyPath::new(stringify!($field), |root: &$root| &root.$field);
            ]
            [$($reads)* $field: $p.optional_value(&$root::$konst)?,]
            $($($rest)*)?
        );
    };

    (@munch $p:ident $root:ident [$($consts:tt)*] [$($reads:tt)*]
        $vis:vis $konst:ident => $field:ident : $ty:ty $(, $($rest:tt)*)?
    ) => {
        $crate::record!(@munch $p $root
            [
                $($consts)*
                #[doc = concat!("Key path of `", stringify!($root), "::", stringify!($field), "`")]
                $vis const $konst: $crate::KeyPath<$root, $ty> =
                    $crate::KeyPath::new(stringify!($field), |root: &$root| &root.$field);
            ]
            [$($reads)* $field: $p.value(&$root::$konst)?,]
            $($($rest)*)?
        );
    };

    (@munch $p:ident $root:ident [$($consts:tt)*] [$($reads:tt)*]) => {
        impl $root {
            $($consts)*
        }

        impl $crate::PartialConvertible for $root {
            #[allow(unused_variables)]
            fn from_partial(
                $p: &$crate::Partial<Self>,
            ) -> ::core::result::Result<Self, $crate::PartialError> {
                ::core::result::Result::Ok($root { $($reads)* })
            }
        }
    };
}
