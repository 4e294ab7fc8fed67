//! Region scanner.
//!
//! Splits a document into literal text and delimited expression regions.
//! Inside an expression region the scanner tracks bracket nesting and
//! string/char/comment state, so a close delimiter inside a literal (the
//! classic `"%}"` case) or under an open bracket is ordinary content. A
//! close delimiter only ends the region at literal state none and bracket
//! depth zero; while suppressed by bracket depth it is consumed whole so its
//! bytes are never re-read as brackets.
//!
//! The scanner owns no global state. Everything needed to continue a scan
//! lives in the ([`Position`], [`ScanState`]) pair yielded with each region,
//! and [`Scanner::resume`] picks up from any such pair.

mod literal;
mod state;

pub use state::{BracketKind, LiteralState, ScanMode, ScanState};

use crate::delims::Delims;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::position::Position;
use crate::tree::{ByteSpan, Region};

/// A resumable region scanner over one immutable document.
///
/// Iterates `(Region, ScanState)` pairs, the state being the scanner's state
/// at the end of that region. The final pair of an unterminated document
/// carries the open literal/bracket state at end of input.
pub struct Scanner<'i> {
    doc: &'i str,
    delims: Delims,
    pos: Position,
    state: ScanState,
    diagnostics: Vec<Diagnostic>,
    done: bool,
}

impl<'i> Scanner<'i> {
    /// Scan `doc` from the start.
    pub fn new(doc: &'i str, delims: Delims) -> Self {
        Self::resume(doc, delims, Position::start(), ScanState::default())
    }

    /// Continue a scan from a previously recorded position and state.
    pub fn resume(doc: &'i str, delims: Delims, pos: Position, state: ScanState) -> Self {
        debug_assert!(pos.offset <= doc.len());
        debug_assert!(doc.is_char_boundary(pos.offset));
        Self {
            doc,
            delims,
            pos,
            state,
            diagnostics: Vec::new(),
            done: false,
        }
    }

    fn rest(&self) -> &'i str {
        &self.doc[self.pos.offset..]
    }

    fn advance(&mut self, len: usize) {
        let doc = self.doc;
        self.pos
            .advance(&doc[self.pos.offset..self.pos.offset + len]);
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.rest().chars().next() {
            self.advance(ch.len_utf8());
        }
    }

    fn push_diagnostic(&mut self, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic {
            kind,
            position: self.pos,
        });
    }

    /// Wrap up the current expression region, error-marked if anything was
    /// diagnosed while scanning it.
    fn take_region(&mut self, span: ByteSpan, content: ByteSpan) -> Region {
        if self.diagnostics.is_empty() {
            Region::Expression { span, content }
        } else {
            Region::ErrorExpression {
                span,
                content,
                diagnostics: std::mem::take(&mut self.diagnostics),
            }
        }
    }

    /// Scan expression content until the close delimiter or end of input.
    fn scan_expression(&mut self, open: Position) -> (Region, ScanState) {
        let content_start = open.offset + self.delims.open().len();

        // a resumed scan may start in the middle of a literal
        if self.state.literal != LiteralState::None {
            self.finish_literal();
        }

        while self.pos.offset < self.doc.len() {
            let rest = self.rest();

            if rest.starts_with(self.delims.close()) {
                if self.state.brackets.is_empty() {
                    let content = ByteSpan::new(content_start, self.pos.offset);
                    self.advance(self.delims.close().len());
                    let span = ByteSpan::new(open.offset, self.pos.offset);
                    self.state.mode = ScanMode::Text;
                    let region = self.take_region(span, content);
                    return (region, self.state.clone());
                }
                // suppressed by bracket depth: consume the delimiter whole
                self.advance(self.delims.close().len());
                continue;
            }

            if rest.starts_with("//") {
                match literal::line_comment(rest) {
                    Ok((_, matched)) => self.advance(matched.len()),
                    Err(_) => self.advance_char(),
                }
                continue;
            }

            if rest.starts_with("/*") {
                match literal::block_comment(rest) {
                    Ok((_, matched)) => self.advance(matched.len()),
                    Err(_) => {
                        // no `*/` before end of input
                        self.state.literal = LiteralState::BlockComment;
                        self.advance(rest.len());
                    }
                }
                continue;
            }

            if rest.starts_with('"') {
                match literal::string_literal(rest) {
                    Ok((_, matched)) => self.advance(matched.len()),
                    Err(_) => {
                        // no closing quote before end of input
                        self.state.literal = LiteralState::Str;
                        self.advance(rest.len());
                    }
                }
                continue;
            }

            if rest.starts_with('\'') {
                match literal::char_literal(rest) {
                    Ok((_, matched)) => self.advance(matched.len()),
                    // a lifetime or stray quote, not a char literal
                    Err(_) => self.advance_char(),
                }
                continue;
            }

            let Some(ch) = rest.chars().next() else { break };
            if let Some(kind) = BracketKind::opening(ch) {
                self.state.brackets.push(kind);
            } else if let Some(kind) = BracketKind::closing(ch) {
                match self.state.brackets.last() {
                    Some(&top) if top == kind => {
                        self.state.brackets.pop();
                    }
                    Some(_) => {
                        self.push_diagnostic(DiagnosticKind::UnbalancedBracket { found: ch });
                        self.state.brackets.pop();
                    }
                    None => {
                        self.push_diagnostic(DiagnosticKind::UnbalancedBracket { found: ch });
                    }
                }
            }
            self.advance(ch.len_utf8());
        }

        // end of input while the region is still open
        self.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::UnterminatedExpression,
            position: open,
        });
        let span = ByteSpan::new(open.offset, self.doc.len());
        let content = ByteSpan::new(content_start, self.doc.len());
        self.done = true;
        let region = self.take_region(span, content);
        (region, self.state.clone())
    }

    /// Close out the literal a resumed scan started inside of.
    fn finish_literal(&mut self) {
        match self.state.literal {
            LiteralState::None => {}
            LiteralState::Str => self.finish_quoted('"'),
            LiteralState::Char => self.finish_quoted('\''),
            LiteralState::LineComment => {
                let rest = self.rest();
                let len = rest.find(['\n', '\r']).unwrap_or(rest.len());
                self.advance(len);
                self.state.literal = LiteralState::None;
            }
            LiteralState::BlockComment => {
                let rest = self.rest();
                match rest.find("*/") {
                    Some(i) => {
                        self.advance(i + 2);
                        self.state.literal = LiteralState::None;
                    }
                    None => self.advance(rest.len()),
                }
            }
        }
    }

    /// Scan to the next unescaped `quote`; stays in the literal at EOF.
    fn finish_quoted(&mut self, quote: char) {
        let rest = self.rest();
        let mut chars = rest.char_indices();
        while let Some((i, ch)) = chars.next() {
            if ch == '\\' {
                chars.next();
            } else if ch == quote {
                self.advance(i + ch.len_utf8());
                self.state.literal = LiteralState::None;
                return;
            }
        }
        self.advance(rest.len());
    }
}

impl<'i> Iterator for Scanner<'i> {
    type Item = (Region, ScanState);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.state.mode {
                ScanMode::Text => {
                    if self.pos.offset >= self.doc.len() {
                        return None;
                    }
                    match self.rest().find(self.delims.open()) {
                        Some(0) => {
                            let open = self.pos;
                            self.advance(self.delims.open().len());
                            self.state.mode = ScanMode::Expression { open };
                        }
                        Some(i) => {
                            let span = ByteSpan::new(self.pos.offset, self.pos.offset + i);
                            self.advance(i);
                            return Some((Region::Text { span }, self.state.clone()));
                        }
                        None => {
                            let span = ByteSpan::new(self.pos.offset, self.doc.len());
                            let len = self.doc.len() - self.pos.offset;
                            self.advance(len);
                            return Some((Region::Text { span }, self.state.clone()));
                        }
                    }
                }
                ScanMode::Expression { open } => {
                    return Some(self.scan_expression(open));
                }
            }
        }
    }
}
