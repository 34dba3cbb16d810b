//! JSON 诊断渲染器
//!
//! Machine-readable form of a diagnostics store for editor and CI tooling.

use serde::{Deserialize, Serialize};
use serde_json::to_string_pretty;

use crate::util::diagnostic::{Diagnostic, DiagnosticReport, Severity};

/// One diagnostic, flattened for tooling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JsonDiagnostic {
    pub id: String,
    pub severity: Severity,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub fixable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&Diagnostic> for JsonDiagnostic {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            id: diagnostic.id.clone(),
            severity: diagnostic.severity,
            file: diagnostic.location.file.clone(),
            line: diagnostic.location.line,
            column: diagnostic.location.column,
            length: diagnostic.location.length,
            message: diagnostic.message.clone(),
            context: Some(diagnostic.context.clone()).filter(|c| !c.is_empty()),
            fixable: diagnostic.fixable,
            suggestion: diagnostic.suggestion.clone(),
        }
    }
}

/// Store snapshot: entries plus the aggregate counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub diagnostics: Vec<JsonDiagnostic>,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub critical_count: usize,
    pub fixable_count: usize,
    pub health: &'a str,
    pub summary: &'a str,
}

/// JSON 诊断渲染器
#[derive(Debug, Clone)]
pub struct JsonEmitter;

impl JsonEmitter {
    /// 渲染诊断为 JSON 字符串
    pub fn render(diagnostic: &Diagnostic) -> String {
        to_string_pretty(&JsonDiagnostic::from(diagnostic)).unwrap_or_else(|_| "{}".to_string())
    }

    /// 渲染多个诊断
    pub fn render_all(diagnostics: &[Diagnostic]) -> String {
        let entries: Vec<JsonDiagnostic> = diagnostics.iter().map(JsonDiagnostic::from).collect();
        to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Entries and report in one document
    pub fn render_report(
        diagnostics: &[Diagnostic],
        report: &DiagnosticReport,
    ) -> String {
        let document = JsonReport {
            diagnostics: diagnostics.iter().map(JsonDiagnostic::from).collect(),
            total_errors: report.total_errors,
            total_warnings: report.total_warnings,
            critical_count: report.critical_count,
            fixable_count: report.fixable_count,
            health: report.health.label(),
            summary: &report.summary,
        };
        to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
    }
}
