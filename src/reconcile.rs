//! Incremental reconciliation.
//!
//! Recomputes only the span of a tree an edit could have affected, reusing
//! untouched regions by shifting their byte offsets. The contract is strict:
//! the result must be structurally identical to a full parse of the new
//! document. Incrementality is a performance property, never an observable
//! one.
//!
//! Why region starts are safe resume points: scanning is a pure function of
//! the remaining input and the scan state, and the state at every region
//! start is the default state. A text region's end is decided by the bytes
//! of the following open delimiter; an expression region's extent is decided
//! entirely by its own bytes. So a rescan seeded at the start of the region
//! preceding the edit sees every byte whose meaning the edit could have
//! changed, and once a rescanned boundary lines up with an old boundary past
//! the edit, the remaining old regions are exactly what a full parse would
//! produce, shifted by the edit delta.

use crate::error::Diagnostic;
use crate::position::Position;
use crate::scanner::{ScanState, Scanner};
use crate::tree::{build_with, Region, SyntaxTree};

/// A single contiguous byte-range replacement.
///
/// `[old_start, old_end)` in the old document was replaced by the bytes at
/// `[old_start, new_end)` in the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditDescriptor {
    pub old_start: usize,
    pub old_end: usize,
    pub new_end: usize,
}

impl EditDescriptor {
    pub fn new(old_start: usize, old_end: usize, new_end: usize) -> Self {
        debug_assert!(old_start <= old_end);
        debug_assert!(old_start <= new_end);
        Self {
            old_start,
            old_end,
            new_end,
        }
    }

    /// Is this replacement consistent with the two document lengths?
    fn fits(&self, old_len: usize, new_len: usize) -> bool {
        self.old_start <= self.old_end
            && self.old_end <= old_len
            && self.old_start <= self.new_end
            && self.new_end <= new_len
            && old_len - self.old_end == new_len - self.new_end
    }
}

/// Why an edit could not be reconciled incrementally. Internal; every case
/// falls back to a full parse.
#[derive(Debug)]
enum UnsafeEditWindow {
    EmptyTree,
    InvalidEdit,
}

/// Reconcile a previous tree with a single edit.
///
/// Returns a tree equal to `build_with(new_doc, old_tree.delims().clone())`;
/// the old tree and document are only consulted to avoid re-scanning
/// unaffected regions. Successive edits to one document must be reconciled
/// in the order they were applied.
pub fn reconcile(
    old_tree: &SyntaxTree,
    old_doc: &str,
    edit: EditDescriptor,
    new_doc: &str,
) -> SyntaxTree {
    match try_reconcile(old_tree, old_doc, edit, new_doc) {
        Ok(tree) => tree,
        Err(reason) => {
            log::debug!("no safe edit window ({reason:?}), falling back to a full parse");
            build_with(new_doc, old_tree.delims().clone())
        }
    }
}

fn try_reconcile(
    old_tree: &SyntaxTree,
    old_doc: &str,
    edit: EditDescriptor,
    new_doc: &str,
) -> Result<SyntaxTree, UnsafeEditWindow> {
    if old_tree.len() != old_doc.len() || !edit.fits(old_doc.len(), new_doc.len()) {
        return Err(UnsafeEditWindow::InvalidEdit);
    }
    let nodes = old_tree.regions();
    if nodes.is_empty() {
        return Err(UnsafeEditWindow::EmptyTree);
    }

    // Damaged window start: the region holding the last byte a delimiter
    // formed across the edit point could begin at. If that region is an
    // expression whose open delimiter the edit may have touched, the
    // preceding text region's end is no longer trustworthy either.
    let reach = old_tree.delims().open().len().saturating_sub(1).max(1);
    let anchor = edit.old_start.saturating_sub(reach);
    let mut idx = nodes.partition_point(|n| n.span().end <= anchor);
    if idx > 0
        && nodes[idx - 1].is_text()
        && edit.old_start < nodes[idx].span().start + old_tree.delims().open().len()
    {
        idx -= 1;
    }
    let damage_lo = nodes[idx].span().start;

    log::trace!(
        "reconciling edit [{}, {}) -> [{}, {}): rescan from byte {damage_lo}, {} prefix regions reused",
        edit.old_start,
        edit.old_end,
        edit.old_start,
        edit.new_end,
        idx
    );

    let mut out: Vec<Region> = nodes[..idx].to_vec();
    let scanner = Scanner::resume(
        new_doc,
        old_tree.delims().clone(),
        Position::locate(new_doc, damage_lo),
        ScanState::default(),
    );

    for (region, _) in scanner {
        let scanned_to = region.span().end;
        out.push(region);
        if scanned_to < edit.new_end {
            continue;
        }
        // Past the edit; if this boundary lines up with an old region
        // boundary, the rest of the old tree can be reused shifted.
        let old_boundary = edit.old_end + (scanned_to - edit.new_end);
        let tail = nodes.partition_point(|n| n.span().start < old_boundary);
        if tail > idx
            && nodes
                .get(tail)
                .is_some_and(|n| n.span().start == old_boundary)
        {
            log::trace!(
                "boundary match at old byte {old_boundary}: reusing {} tail regions",
                nodes.len() - tail
            );
            for old in &nodes[tail..] {
                out.push(shift_region(old, old_boundary, scanned_to, new_doc));
            }
            let tree = SyntaxTree::new(out, new_doc.len(), old_tree.delims().clone());
            debug_assert!(tree.check_coverage());
            return Ok(tree);
        }
    }

    // The rescan ran to the end of the document.
    let tree = SyntaxTree::new(out, new_doc.len(), old_tree.delims().clone());
    debug_assert!(tree.check_coverage());
    Ok(tree)
}

/// Move a reused region onto the new document, re-locating any diagnostic
/// positions so the result is indistinguishable from a full parse.
fn shift_region(region: &Region, old_base: usize, new_base: usize, new_doc: &str) -> Region {
    match region {
        Region::Text { span } => Region::Text {
            span: span.rebase(old_base, new_base),
        },
        Region::Expression { span, content } => Region::Expression {
            span: span.rebase(old_base, new_base),
            content: content.rebase(old_base, new_base),
        },
        Region::ErrorExpression {
            span,
            content,
            diagnostics,
        } => Region::ErrorExpression {
            span: span.rebase(old_base, new_base),
            content: content.rebase(old_base, new_base),
            diagnostics: diagnostics
                .iter()
                .map(|d| Diagnostic {
                    kind: d.kind.clone(),
                    position: Position::locate(
                        new_doc,
                        d.position.offset - old_base + new_base,
                    ),
                })
                .collect(),
        },
    }
}
