//! Declarative rendering engine
//!
//! Renderers describe what should be on screen as a tree of [`Node`]s; the
//! evaluator turns that tree into a [`Document`] of styled lines with stable
//! section identity. The document is the only thing a render surface ever
//! sees - it carries no terminal or widget types.

mod ast;
mod doc;
mod format;

pub use ast::*;
pub use doc::*;
pub use format::*;
