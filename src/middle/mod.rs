//! Text-level passes over the source buffer
//!
//! The optimizer rewrites the text; the analyzer only reads it.

pub mod analyzer;
pub mod optimizer;

pub use analyzer::{AnalysisReport, Analyzer, AnalyzerConfig, CodeIssue, CodeMetrics, IssueCategory};
pub use optimizer::{OptimizationStats, OptimizeError, Optimizer, OptimizerConfig, Pass};
