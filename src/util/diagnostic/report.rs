//! Aggregate diagnostic report

use serde::Serialize;
use std::fmt;
use std::time::SystemTime;

use super::error::Diagnostic;

/// Tri-level health label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Good,
    Warning,
    Critical,
}

impl Health {
    pub fn label(&self) -> &'static str {
        match self {
            Health::Good => "GOOD",
            Health::Warning => "WARNING",
            Health::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Health {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counts over a diagnostics store at one point in time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub total_errors: usize,
    pub total_warnings: usize,
    pub critical_count: usize,
    pub fixable_count: usize,
    pub health: Health,
    pub summary: String,
    pub created_at: SystemTime,
}

impl DiagnosticReport {
    /// Critical and fixable counts are taken over the error sequence only.
    pub fn from_entries(
        errors: &[Diagnostic],
        warning_count: usize,
    ) -> Self {
        let critical_count = errors.iter().filter(|d| d.is_critical()).count();
        let fixable_count = errors.iter().filter(|d| d.fixable).count();

        let health = if critical_count > 0 {
            Health::Critical
        } else if !errors.is_empty() {
            Health::Warning
        } else {
            Health::Good
        };

        let summary = format!(
            "System health: {} | Errors: {} | Warnings: {} | Fixable: {}",
            health,
            errors.len(),
            warning_count,
            fixable_count
        );

        Self {
            total_errors: errors.len(),
            total_warnings: warning_count,
            critical_count,
            fixable_count,
            health,
            summary,
            created_at: SystemTime::now(),
        }
    }
}
