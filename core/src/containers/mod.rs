//! Container codec.
//!
//! Every collection is `[count:i32]` followed by `count` elements, each
//! encoded per its own contract (primitive, framed record, polymorphic slot).
//!
//! Types:
//! - `ArrayL64`: counted i64 array, unframed
//! - `ObjString`: framed string, the usual map key
//! - `ObjArray`: framed, counted polymorphic slots
//! - `ObjectMap`: framed, counted key/value slot pairs in insertion order

pub mod encode;
pub mod decode;
pub mod array;
pub mod objstring;
pub mod objarray;
pub mod map;

pub use array::ArrayL64;
pub use objstring::ObjString;
pub use objarray::ObjArray;
pub use map::ObjectMap;
