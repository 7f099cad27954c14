//! The append-only source listing rendered alongside diagnostics.

use crate::diagnostics::Diagnostics;

/// An ordered, append-only sequence of source lines. Rendering interleaves
/// each line with the diagnostics attached to it (see
/// [`Diagnostics::rendered_for_line`]).
#[derive(Debug, Clone, Default)]
pub struct Listing {
    lines: Vec<String>,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed source line. Called by the lexer each time it
    /// crosses a newline.
    pub fn push_line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, number: u32) -> Option<&str> {
        self.lines.get(number as usize - 1).map(String::as_str)
    }

    /// Render the listing: each line prefixed by its 1-based line number,
    /// followed by its diagnostics indented on their own lines.
    pub fn render(&self, diagnostics: &Diagnostics) -> String {
        let mut out = String::new();
        for (i, text) in self.lines.iter().enumerate() {
            let line_no = (i + 1) as u32;
            out.push_str(&format!("{line_no:>4} | {text}\n"));
            for diag in diagnostics.rendered_for_line(line_no) {
                out.push_str(&format!("     > {diag}\n"));
            }
        }
        out
    }
}

#[cfg(test)]
mod listing_tests;
