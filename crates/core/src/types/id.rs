//! Typed entity identifiers.
//!
//! The backend hands out plain numeric ids; wrapping each entity's id in its
//! own newtype keeps a product id from ever being passed where an order id
//! belongs.

/// Define a newtype id for one entity.
///
/// The generated type wraps the backend's numeric id and derives the usual
/// value-type traits plus transparent serde, so it serializes exactly like
/// the bare number in JSON payloads. `FromStr` is included for parsing ids
/// out of path segments and form fields.
///
/// ```rust
/// # use miga_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let torta = ProductId::new(3);
/// assert_eq!(torta.get(), 3);
/// // `let wrong: OrderId = torta;` does not compile.
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw backend id.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// The raw numeric id.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(UserId);
define_id!(PostId);
