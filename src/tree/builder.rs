//! Tolerant tree construction.

use crate::delims::Delims;
use crate::scanner::Scanner;

use super::node::SyntaxTree;

/// Parse a document into a [`SyntaxTree`] using the default `{%`/`%}`
/// delimiters.
///
/// Always structurally succeeds: malformed input ends up in error-marked
/// regions, never in a failed parse.
pub fn build(document: &str) -> SyntaxTree {
    build_with(document, Delims::default())
}

/// Parse a document using a custom delimiter pair.
pub fn build_with(document: &str, delims: Delims) -> SyntaxTree {
    let mut nodes = Vec::new();
    for (region, _) in Scanner::new(document, delims.clone()) {
        nodes.push(region);
    }
    let tree = SyntaxTree::new(nodes, document.len(), delims);
    debug_assert!(
        tree.check_coverage(),
        "regions must cover the document without gaps"
    );
    tree
}
