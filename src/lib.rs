mod collection;
mod error;
pub mod helpers;
mod order;
pub use collection::*;
pub use error::*;
pub use helpers::{flatten, stream_to_map, JsonStreamer, Limits};
pub use order::*;

/// Typed getters over [`Collection::property`] for keys known ahead of time
///
/// Meant for the body of an `impl` block of a type that derefs to
/// [`Collection`]. Each `name: kind` pair becomes `pub fn name(&self)` reading
/// the key `"name"`:
/// - `int` returns `Option<i64>` (numeric strings included)
/// - `str` returns the raw `Option<&str>`
/// - `collection` returns `Option<Collection>`
#[macro_export]
macro_rules! collection_accessors {
    ($($(#[$meta:meta])* $name:ident: $kind:ident,)+) => {
        $(
            $crate::collection_accessors!(@accessor $(#[$meta])* $name: $kind);
        )+
    };

    (@accessor $(#[$meta:meta])* $name:ident: int) => {
        $(#[$meta])*
        pub fn $name(&self) -> Option<i64> {
            self.property_int(stringify!($name))
        }
    };

    (@accessor $(#[$meta:meta])* $name:ident: str) => {
        $(#[$meta])*
        pub fn $name(&self) -> Option<&str> {
            self.property_str(stringify!($name))
        }
    };

    (@accessor $(#[$meta:meta])* $name:ident: collection) => {
        $(#[$meta])*
        pub fn $name(&self) -> Option<$crate::Collection> {
            self.property_collection(stringify!($name))
        }
    };
}
