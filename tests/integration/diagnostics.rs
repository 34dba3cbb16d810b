//! Diagnostics store, recovery advisor and reports through the public API

use std::sync::Arc;

use sysc::util::diagnostic::{
    Diagnostic, DiagnosticError, DiagnosticsStore, ErrorLocation, Health, JsonEmitter,
    RecoveryAdvisor, Severity, NO_STRATEGY_FOUND,
};
use sysc::{CompileConfig, Compiler};

#[test]
fn test_capacity_exceeded_on_next_record() {
    let store = DiagnosticsStore::new(2);
    store.record(Severity::Error, "a", ErrorLocation::new("f.sys", 1, 1)).unwrap();
    store.record(Severity::Critical, "b", ErrorLocation::new("f.sys", 2, 1)).unwrap();

    let third = store.record(Severity::Error, "c", ErrorLocation::new("f.sys", 3, 1));
    assert_eq!(third, Err(DiagnosticError::CapacityExceeded { max: 2 }));
    assert_eq!(store.error_count(), 2);
    assert_eq!(store.report().health, Health::Critical);
}

#[test]
fn test_advisor_over_store_entries() {
    let store = DiagnosticsStore::new(10);
    store
        .record(Severity::Error, "missing semicolon", ErrorLocation::new("f.sys", 4, 9))
        .unwrap();
    store
        .record(Severity::Error, "expected '{' (line 7)", ErrorLocation::new("f.sys", 7, 1))
        .unwrap();

    let advisor = RecoveryAdvisor::new();
    let advice: Vec<_> = store.errors().iter().map(|d| advisor.advise(d)).collect();

    assert!(advice[0].automatic);
    assert!(!advice[1].is_found());
    assert_eq!(advice[1].suggestion, NO_STRATEGY_FOUND);
}

#[test]
fn test_compiler_fills_store_and_reports() {
    let store = Arc::new(DiagnosticsStore::default());
    let config = CompileConfig::new().with_file_name("main.sys");
    let compiler = Compiler::with_config("func main( {\n", config).with_store(store.clone());
    assert!(compiler.compile().is_err());

    let text = store.render();
    assert!(text.contains("=== ERRORS ==="));
    assert!(text.contains("  File: main.sys:2:1\n"));
    assert!(text.contains("  Message: expected '{' (line 2)\n"));

    let report = store.report();
    assert_eq!(report.health, Health::Warning);
    assert_eq!(
        report.summary,
        "System health: WARNING | Errors: 1 | Warnings: 0 | Fixable: 0"
    );
}

#[test]
fn test_json_report_lists_entries() {
    let store = DiagnosticsStore::new(10);
    store.record_diagnostic(
        Diagnostic::new(Severity::Warning, "odd spacing", ErrorLocation::new("a.sys", 1, 1))
            .with_context("x  =  1"),
    )
    .unwrap();
    store.record_with_suggestion(
        Severity::Error,
        "missing semicolon",
        ErrorLocation::new("a.sys", 2, 6),
        "Add ';' at the end of the line",
    );

    let json = JsonEmitter::render_report(&store.all(), &store.report());
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["totalErrors"], 1);
    assert_eq!(value["totalWarnings"], 1);
    assert_eq!(value["fixableCount"], 1);
    assert_eq!(value["diagnostics"][0]["message"], "missing semicolon");
    assert_eq!(value["diagnostics"][1]["context"], "x  =  1");
}
