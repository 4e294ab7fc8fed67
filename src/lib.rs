//! Error-tolerant scanner and incremental syntax tree for templates that
//! embed host-language expressions in literal text.
//!
//! A document is split into [`Region`]s: literal text, and expressions
//! delimited by `{%`/`%}` ([`Delims`] makes the pair configurable). The
//! scanner tracks just enough host-language lexical structure (strings,
//! char literals, comments, bracket nesting) to know when a `%}` really
//! closes an expression, and [`reconcile`] re-scans only the part of a
//! document an edit touched.
//!
//! ```
//! use weft::build;
//!
//! let tree = build("hello {% user.name() %}!");
//! let kinds: Vec<bool> = tree.regions().iter().map(|r| r.is_text()).collect();
//! assert_eq!(kinds, vec![true, false, true]);
//! ```

pub mod delims;
pub mod error;
pub mod position;
pub mod reconcile;
pub mod result;
pub mod scanner;
pub mod tree;

pub use delims::Delims;
pub use error::{Diagnostic, DiagnosticKind};
pub use position::Position;
pub use reconcile::{reconcile, EditDescriptor};
pub use tree::{build, build_with, ByteSpan, Region, SyntaxTree};
