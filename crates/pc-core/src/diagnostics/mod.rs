//! Diagnostic collection, attached per-line to the [`crate::Listing`].
//!
//! An error with the same message attached to the same source line is
//! silently discarded on insert (checked, not deduplicated after the fact),
//! so a multi-pass evaluator that re-raises the same condition on
//! successive passes does not double-report it.

mod message;

#[cfg(test)]
mod diagnostics_tests;

pub use message::Severity;

use message::DiagnosticMessage;

/// Collection of diagnostics accumulated while lexing, parsing and
/// evaluating attributes.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Builder for one diagnostic, returned by [`Diagnostics::error`] /
/// [`Diagnostics::warning`]. Dropping it without calling
/// [`emit`](DiagnosticBuilder::emit) silently discards the diagnostic.
#[must_use = "diagnostic not recorded, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, line: u32, msg: impl Into<String>) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::new(Severity::Error, line, msg),
        }
    }

    pub fn warning(&mut self, line: u32, msg: impl Into<String>) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::new(Severity::Warning, line, msg),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(DiagnosticMessage::is_error)
    }

    /// Rendered diagnostic lines attached to `line`, in insertion order.
    pub fn rendered_for_line(&self, line: u32) -> Vec<String> {
        self.messages
            .iter()
            .filter(|d| d.line == line)
            .map(ToString::to_string)
            .collect()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.messages.iter().map(ToString::to_string).collect()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        for m in other.messages {
            self.insert_deduped(m);
        }
    }

    fn insert_deduped(&mut self, message: DiagnosticMessage) {
        let already_present = self
            .messages
            .iter()
            .any(|m| m.line == message.line && m.message == message.message);
        if !already_present {
            self.messages.push(message);
        }
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Record the diagnostic, discarding it if the same message is already
    /// attached to the same line.
    pub fn emit(self) {
        self.diagnostics.insert_deduped(self.message);
    }
}
