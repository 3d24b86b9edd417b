//! Raw and normalized microdata values.
//!
//! Pure data, no I/O.

pub mod raw;
pub mod value;

pub use raw::{PropertyBag, RawNode};
pub use value::{Attributes, Value};
