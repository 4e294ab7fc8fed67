use thiserror::Error;

use crate::position::Position;

/// A problem found while scanning an expression region.
///
/// Diagnostics never abort a scan; they are attached to the error-marked
/// region they were found in, so a tree over a half-typed document is still
/// complete and usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at {position}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// The document ended while an expression region was still open.
    #[error("expression region is never closed")]
    UnterminatedExpression,
    /// A closing bracket with no matching opener in this expression.
    #[error("unbalanced `{found}` in expression")]
    UnbalancedBracket { found: char },
}
