//! 诊断数据结构
//!
//! A recorded diagnostic carries an id, a severity, the message, where it
//! happened, optional free-text context, and, when it is fixable, a
//! suggestion line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// 诊断严重级别
///
/// Ordered: `Info < Warning < Error < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Upper-case tag used in reports
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Only warnings go to the warning sequence of a store
    #[inline]
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Where a diagnostic points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl ErrorLocation {
    pub fn new(
        file: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            length: 0,
        }
    }

    #[inline]
    pub fn with_length(
        mut self,
        length: usize,
    ) -> Self {
        self.length = length;
        self
    }
}

impl fmt::Display for ErrorLocation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A recorded compile-time problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub location: ErrorLocation,
    /// Free-text context, empty when absent
    pub context: String,
    pub created_at: SystemTime,
    pub fixable: bool,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Diagnostic without an id; used to query the recovery advisor
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        location: ErrorLocation,
    ) -> Self {
        Self {
            id: String::new(),
            severity,
            message: message.into(),
            location,
            context: String::new(),
            created_at: SystemTime::now(),
            fixable: false,
            suggestion: None,
        }
    }

    #[inline]
    pub fn with_context(
        mut self,
        context: impl Into<String>,
    ) -> Self {
        self.context = context.into();
        self
    }

    #[inline]
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.severity, self.id, self.location, self.message
        )
    }
}

/// Diagnostics store failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticError {
    #[error("maximum error count reached ({max})")]
    CapacityExceeded { max: usize },
}
