//! Diagnostics store
//!
//! Accumulates errors and warnings behind a reader/writer lock so a store
//! filled by one thread can be queried from others. Errors are capped;
//! warnings are not counted toward the cap.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use tracing::warn;

use super::emitter::TextEmitter;
use super::error::{Diagnostic, DiagnosticError, ErrorLocation, Severity};
use super::report::DiagnosticReport;

/// Default capacity for stored errors
pub const DEFAULT_MAX_ERRORS: usize = 100;

#[derive(Debug, Default)]
struct Entries {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Entries {
    fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// `ERR-<unix seconds mod 10000>-<stored count>`.
    ///
    /// Not collision-free: two records in the same second at the same count
    /// (for instance around a `clear`) produce the same id.
    fn next_id(&self) -> String {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        format!("ERR-{}-{}", seconds % 10_000, self.len())
    }

    fn push(
        &mut self,
        diagnostic: Diagnostic,
    ) {
        if diagnostic.severity.is_warning() {
            self.warnings.push(diagnostic);
        } else {
            self.errors.push(diagnostic);
        }
    }
}

/// Error/warning accumulator
#[derive(Debug)]
pub struct DiagnosticsStore {
    entries: RwLock<Entries>,
    max_errors: usize,
}

impl Default for DiagnosticsStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ERRORS)
    }
}

impl DiagnosticsStore {
    pub fn new(max_errors: usize) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            max_errors,
        }
    }

    #[inline]
    pub fn max_errors(&self) -> usize {
        self.max_errors
    }

    /// Record a diagnostic; returns its generated id.
    ///
    /// Once the stored error count has reached the cap every record is
    /// rejected, warnings included, and nothing is stored.
    pub fn record(
        &self,
        severity: Severity,
        message: impl Into<String>,
        location: ErrorLocation,
    ) -> Result<String, DiagnosticError> {
        self.record_diagnostic(Diagnostic::new(severity, message, location))
    }

    /// Like [`record`](Self::record), keeping the caller's context text.
    pub fn record_diagnostic(
        &self,
        mut diagnostic: Diagnostic,
    ) -> Result<String, DiagnosticError> {
        let mut entries = self.entries.write();

        if entries.errors.len() >= self.max_errors {
            warn!(
                "Diagnostics store full ({} errors), rejected: {}",
                self.max_errors, diagnostic.message
            );
            return Err(DiagnosticError::CapacityExceeded {
                max: self.max_errors,
            });
        }

        diagnostic.id = entries.next_id();
        diagnostic.created_at = SystemTime::now();
        let id = diagnostic.id.clone();
        entries.push(diagnostic);
        Ok(id)
    }

    /// Record a fixable error with a suggestion.
    ///
    /// Always succeeds: the cap is not checked, and the entry goes to the
    /// error sequence whatever its severity.
    pub fn record_with_suggestion(
        &self,
        severity: Severity,
        message: impl Into<String>,
        location: ErrorLocation,
        suggestion: impl Into<String>,
    ) -> String {
        let mut entries = self.entries.write();

        let mut diagnostic = Diagnostic::new(severity, message, location);
        diagnostic.id = entries.next_id();
        diagnostic.fixable = true;
        diagnostic.suggestion = Some(suggestion.into());

        let id = diagnostic.id.clone();
        entries.errors.push(diagnostic);
        id
    }

    /// All entries, errors before warnings
    pub fn all(&self) -> Vec<Diagnostic> {
        let entries = self.entries.read();
        entries
            .errors
            .iter()
            .chain(entries.warnings.iter())
            .cloned()
            .collect()
    }

    pub fn errors(&self) -> Vec<Diagnostic> {
        self.entries.read().errors.clone()
    }

    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.entries.read().warnings.clone()
    }

    /// Entries whose location names `file`, errors before warnings
    pub fn by_file(
        &self,
        file: &str,
    ) -> Vec<Diagnostic> {
        let entries = self.entries.read();
        entries
            .errors
            .iter()
            .chain(entries.warnings.iter())
            .filter(|d| d.location.file == file)
            .cloned()
            .collect()
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.entries.read().errors.len()
    }

    #[inline]
    pub fn warning_count(&self) -> usize {
        self.entries.read().warnings.len()
    }

    /// Any entry in the error sequence blocks
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.entries.read().errors.is_empty()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.errors.clear();
        entries.warnings.clear();
    }

    /// Text report: errors, then warnings, then a totals line
    pub fn render(&self) -> String {
        let entries = self.entries.read();
        TextEmitter::new().render_groups(&entries.errors, &entries.warnings)
    }

    pub fn report(&self) -> DiagnosticReport {
        let entries = self.entries.read();
        DiagnosticReport::from_entries(&entries.errors, entries.warnings.len())
    }
}
