//! Concrete syntax tree for scanned documents.
//!
//! The tree preserves every byte of the source as an ordered sequence of
//! region nodes. It is the sole contract surfaced to downstream renderers,
//! highlighters and editor integrations.

mod builder;
mod node;
mod span;

pub use builder::{build, build_with};
pub use node::{Region, SyntaxTree};
pub use span::ByteSpan;
