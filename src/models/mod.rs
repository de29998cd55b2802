//! Data model definitions
//!
//! Resource kinds and the items fetched for them. Everything here is plain
//! data - no I/O, no rendering.

mod item;
mod resource_kind;

pub use item::*;
pub use resource_kind::*;
