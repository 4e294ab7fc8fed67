//! Region node definitions.

use crate::delims::Delims;
use crate::error::Diagnostic;

use super::span::ByteSpan;

/// A classified span of a document.
///
/// Expression spans include their delimiters; `content` is the sub-span
/// between them, which is what gets handed to a host-language parser or
/// highlighter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Literal passthrough content.
    Text { span: ByteSpan },

    /// A well-formed delimited expression.
    Expression { span: ByteSpan, content: ByteSpan },

    /// An expression region that scanned with errors (unterminated, stray
    /// brackets). Kept in the tree so tooling over half-typed documents
    /// still sees full coverage.
    ErrorExpression {
        span: ByteSpan,
        content: ByteSpan,
        diagnostics: Vec<Diagnostic>,
    },
}

impl Region {
    pub fn span(&self) -> ByteSpan {
        match self {
            Self::Text { span } => *span,
            Self::Expression { span, .. } => *span,
            Self::ErrorExpression { span, .. } => *span,
        }
    }

    /// The expression content sub-span, delimiters excluded.
    ///
    /// `None` for text regions.
    pub fn content(&self) -> Option<ByteSpan> {
        match self {
            Self::Text { .. } => None,
            Self::Expression { content, .. } => Some(*content),
            Self::ErrorExpression { content, .. } => Some(*content),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// True for both well-formed and error-marked expression regions.
    pub fn is_expression(&self) -> bool {
        !self.is_text()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorExpression { .. })
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::ErrorExpression { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }

    /// The text this region covers in `doc`.
    pub fn text<'d>(&self, doc: &'d str) -> &'d str {
        self.span().slice(doc)
    }
}

/// The root of a scanned document.
///
/// Holds the ordered region nodes covering every byte of the document, with
/// no gaps and no overlaps. Trees are immutable; reconciling an edit
/// produces a successor tree rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxTree {
    nodes: Vec<Region>,
    len: usize,
    delims: Delims,
}

impl SyntaxTree {
    pub(crate) fn new(nodes: Vec<Region>, len: usize, delims: Delims) -> Self {
        Self { nodes, len, delims }
    }

    /// The top-level regions in document order.
    pub fn regions(&self) -> &[Region] {
        &self.nodes
    }

    /// The delimiter pair this tree was scanned with.
    pub fn delims(&self) -> &Delims {
        &self.delims
    }

    /// Length in bytes of the document this tree covers.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The region containing byte `offset`, if any.
    ///
    /// Editor tooling uses this to decide which grammar applies at the
    /// cursor.
    pub fn region_at(&self, offset: usize) -> Option<&Region> {
        if offset >= self.len {
            return None;
        }
        let idx = self.nodes.partition_point(|n| n.span().end <= offset);
        self.nodes.get(idx).filter(|n| n.span().contains(offset))
    }

    /// Every diagnostic attached to error-marked regions, in document order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.nodes.iter().flat_map(|n| n.diagnostics().iter())
    }

    /// Reassemble the source from the regions.
    ///
    /// For the document the tree was built from this is an exact
    /// byte-for-byte round trip.
    pub fn reconstruct(&self, doc: &str) -> String {
        self.nodes.iter().map(|n| n.text(doc)).collect()
    }

    /// Coverage invariant: contiguous regions from 0 to document length.
    pub(crate) fn check_coverage(&self) -> bool {
        let mut at = 0;
        for node in &self.nodes {
            if node.span().start != at || node.span().is_empty() {
                return false;
            }
            at = node.span().end;
        }
        at == self.len
    }
}
