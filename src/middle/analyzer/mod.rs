//! 静态分析器
//!
//! Computes coarse structural metrics over raw source text and flags a few
//! line-level lints. Everything here is keyword counting and substring
//! matching; results are signals, not proofs.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use tracing::debug;


/// Report text when no issue was found
pub const NO_ISSUES: &str = "No issues found";

/// Analyzer thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Lines longer than this (in characters) are flagged
    pub max_line_length: usize,
    /// More `;` than this on one line is flagged
    pub max_statements_per_line: usize,
    pub complexity_threshold: f64,
    /// Placeholder; nothing is measured
    pub coverage_estimate: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_line_length: 120,
            max_statements_per_line: 2,
            complexity_threshold: 15.0,
            coverage_estimate: 0.75,
        }
    }
}

/// Structural metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CodeMetrics {
    pub lines: usize,
    pub functions: usize,
    pub branches: usize,
    /// `branches / (functions + 1)`
    pub complexity: f64,
    pub coverage: f64,
}

impl CodeMetrics {
    pub fn compute(
        source: &str,
        coverage: f64,
    ) -> Self {
        let lines = source.split('\n').count();
        let functions = source.matches("func ").count();
        let branches = source.matches("if ").count()
            + source.matches("for ").count()
            + source.matches("else").count();
        let complexity = branches as f64 / (functions + 1) as f64;

        Self {
            lines,
            functions,
            branches,
            complexity,
            coverage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Info,
    Warning,
    Error,
}

impl IssueCategory {
    pub fn tag(&self) -> &'static str {
        match self {
            IssueCategory::Info => "INFO",
            IssueCategory::Warning => "WARNING",
            IssueCategory::Error => "ERROR",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One lint finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeIssue {
    pub category: IssueCategory,
    pub message: String,
    /// 1-based
    pub line: usize,
    /// 1..=10
    pub severity: u8,
}

impl CodeIssue {
    fn warning(
        message: impl Into<String>,
        line: usize,
        severity: u8,
    ) -> Self {
        Self {
            category: IssueCategory::Warning,
            message: message.into(),
            line,
            severity,
        }
    }
}

/// Metrics and issues for one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub metrics: CodeMetrics,
    pub issues: Vec<CodeIssue>,
}

impl AnalysisReport {
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.category == IssueCategory::Error)
    }

    /// Text report, one block per issue
    pub fn render(&self) -> String {
        if self.issues.is_empty() {
            return NO_ISSUES.to_string();
        }

        let mut report = String::new();
        report.push_str("=== Code Analysis Report ===\n");
        let _ = writeln!(report, "Total issues: {}\n", self.issues.len());

        for issue in &self.issues {
            let _ = writeln!(
                report,
                "[{}] (Line {}, Severity {}/10)",
                issue.category, issue.line, issue.severity
            );
            let _ = writeln!(report, "  → {}\n", issue.message);
        }

        report
    }
}

/// 静态分析器
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Never fails
    pub fn analyze(
        &self,
        source: &str,
    ) -> AnalysisReport {
        let metrics = CodeMetrics::compute(source, self.config.coverage_estimate);
        let mut issues = self.line_issues(source);

        if metrics.complexity > self.config.complexity_threshold {
            issues.push(CodeIssue {
                category: IssueCategory::Error,
                message: format!("Cyclomatic complexity too high: {:.2}", metrics.complexity),
                line: 1,
                severity: 8,
            });
        }

        debug!(
            "Analyzed {} lines: {} functions, {} branches, {} issues",
            metrics.lines,
            metrics.functions,
            metrics.branches,
            issues.len()
        );

        AnalysisReport { metrics, issues }
    }

    fn line_issues(
        &self,
        source: &str,
    ) -> Vec<CodeIssue> {
        let mut issues = Vec::new();
        let mut offset = 0;

        for (index, line) in source.split('\n').enumerate() {
            let line_no = index + 1;

            let length = line.chars().count();
            if length > self.config.max_line_length {
                issues.push(CodeIssue::warning(
                    format!("Line too long ({} characters)", length),
                    line_no,
                    3,
                ));
            }

            if line.matches(';').count() > self.config.max_statements_per_line {
                issues.push(CodeIssue::warning(
                    "Too many statements on one line",
                    line_no,
                    2,
                ));
            }

            // Any `=` from here to the end of the file counts as a use.
            if line.contains("var ") && !source[offset..].contains('=') {
                issues.push(CodeIssue::warning("Potential unused variable", line_no, 4));
            }

            offset += line.len() + 1;
        }

        issues
    }
}

/// Analyze with default thresholds
pub fn analyze(source: &str) -> AnalysisReport {
    Analyzer::default().analyze(source)
}
