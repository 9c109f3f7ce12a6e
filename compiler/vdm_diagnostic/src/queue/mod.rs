//! Diagnostic collection for one checking run.
//!
//! The queue keeps diagnostics in the order they were reported, which is
//! the order the checker walked the definitions. Two filters apply to
//! errors only: a cap on the number kept, and suppression of an error that
//! repeats the previous one at the same place.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use vdm_ir::Span;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed};

/// Leading characters of a message that take part in duplicate detection.
const DEDUP_PREFIX: usize = 30;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Errors kept before further errors are dropped; 0 keeps all.
    pub error_limit: usize,
    /// Drop an error whose code, primary span and message prefix repeat the
    /// previous error.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Keep everything.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// What two errors must share to count as the same report.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
struct ErrorKey {
    code: ErrorCode,
    span: Option<Span>,
    prefix: u64,
}

impl ErrorKey {
    fn of(diag: &Diagnostic) -> Self {
        let end = diag
            .message
            .char_indices()
            .nth(DEDUP_PREFIX)
            .map_or(diag.message.len(), |(i, _)| i);
        let mut hasher = FxHasher::default();
        diag.message[..end].hash(&mut hasher);
        ErrorKey {
            code: diag.code,
            span: diag.primary_span(),
            prefix: hasher.finish(),
        }
    }
}

/// Ordered diagnostic sink.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    last_error: Option<ErrorKey>,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Queue `diag`; `false` if a filter dropped it.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        if diag.is_error() {
            if self.limit_reached() {
                return false;
            }
            let key = ErrorKey::of(&diag);
            if self.config.deduplicate && self.last_error == Some(key) {
                return false;
            }
            self.last_error = Some(key);
            self.error_count += 1;
        }
        self.diagnostics.push(diag);
        true
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.push(diag);
        }
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit != 0 && self.error_count >= self.config.error_limit
    }

    /// Errors kept so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Queue an error and return proof that it was reported.
    ///
    /// A filtered error still yields the proof: an equivalent error is
    /// already queued, or the limit was hit by earlier errors.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diag.is_error(), "emit_error needs an error diagnostic");
        self.push(diag);
        ErrorGuaranteed::new()
    }

    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Take the queued diagnostics in report order, resetting the filters.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        self.last_error = None;
        std::mem::take(&mut self.diagnostics)
    }

    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests;
