//! Template delimiters.

use std::borrow::Cow;

/// The delimiter pair separating expression regions from literal text.
///
/// Defaults to `{%` / `%}`. Both strings must be non-empty; ASCII pairs are
/// recommended. A pair where one delimiter is a substring of the other is
/// not rejected but scanning behavior for such documents is unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delims {
    open: Cow<'static, str>,
    close: Cow<'static, str>,
}

impl Delims {
    pub fn new(open: impl Into<Cow<'static, str>>, close: impl Into<Cow<'static, str>>) -> Self {
        let open = open.into();
        let close = close.into();
        assert!(
            !open.is_empty() && !close.is_empty(),
            "delimiters must be non-empty"
        );
        Self { open, close }
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }
}

impl Default for Delims {
    fn default() -> Self {
        Self {
            open: Cow::Borrowed("{%"),
            close: Cow::Borrowed("%}"),
        }
    }
}
