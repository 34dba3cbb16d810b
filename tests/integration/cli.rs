//! Integration tests for the `sysc` binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper function to get the path to the sysc binary
fn sysc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sysc"))
}

/// Helper function to create a test file
fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Run the binary inside `dir` so no stray project config is picked up
fn sysc(
    dir: &Path,
    args: &[&str],
) -> Output {
    Command::new(sysc_bin())
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_version() {
    let temp_dir = TempDir::new().unwrap();
    let output = sysc(temp_dir.path(), &["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("sysc "));
}

#[test]
fn test_tokenize_prints_one_line_per_token() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "a.sys", "x = 10;");

    let output = sysc(temp_dir.path(), &["tokenize", "a.sys"]);
    assert!(output.status.success());

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "1:1\tIDENT\t\"x\"");
    assert_eq!(lines[2], "1:5\tINT\t\"10\"");
    assert!(lines[4].contains("\tEOF\t"));
}

#[test]
fn test_parse_valid_and_invalid() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "good.sys", "func main() { return 0; }");
    create_test_file(&temp_dir, "bad.sys", "x;\nfunc (");

    let good = sysc(temp_dir.path(), &["parse", "good.sys"]);
    assert!(good.status.success());
    assert!(stdout(&good).contains("OK good.sys"));

    let bad = sysc(temp_dir.path(), &["parse", "bad.sys"]);
    assert_eq!(bad.status.code(), Some(1));
    let text = stdout(&bad);
    assert!(text.contains("expected function name (line 2)"));
    assert!(text.contains("FAILED bad.sys"));
}

#[test]
fn test_optimize_prints_rewritten_text() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "c.sys", "// folded\nconst x = 5; y = x + 1;\n");

    let output = sysc(temp_dir.path(), &["optimize", "c.sys", "--stats"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\nconst 5 = 5; y = 5 + 1;");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("constants=1"));
}

#[test]
fn test_optimize_honours_config_file() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "c.sys", "const x = 5; y = x;");
    create_test_file(&temp_dir, "custom.toml", "[optimizer]\nconstants = false\n");

    let output = sysc(temp_dir.path(), &["--config", "custom.toml", "optimize", "c.sys"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "const x = 5; y = x;");
}

#[test]
fn test_project_config_is_discovered() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "c.sys", "a;  // note");
    create_test_file(&temp_dir, "sysc.toml", "[optimizer]\ncomments = false\n");

    let output = sysc(temp_dir.path(), &["optimize", "c.sys"]);
    assert_eq!(stdout(&output), "a; // note");
}

#[test]
fn test_missing_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "c.sys", "x;");

    let output = sysc(temp_dir.path(), &["--config", "nope.toml", "optimize", "c.sys"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"));
}

#[test]
fn test_analyze_reports_metrics() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "m.sys", "func f() {\n  if a { } else { }\n}\n");

    let output = sysc(temp_dir.path(), &["analyze", "m.sys"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Functions: 1 | Branches: 2 | Complexity: 1.00"));
    assert!(text.contains("No issues found"));

    let json = sysc(temp_dir.path(), &["analyze", "m.sys", "--json"]);
    let value: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    assert_eq!(value["metrics"]["functions"], 1);
}

#[test]
fn test_compile_failure_prints_report_and_advice() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "bad.sys", "if ready go\n");

    let output = sysc(temp_dir.path(), &["compile", "bad.sys"]);
    assert_eq!(output.status.code(), Some(1));

    let text = stdout(&output);
    assert!(text.contains("=== ERRORS ==="));
    assert!(text.contains("  Message: expected '{' after if condition (line 1)"));
    assert!(text.contains("  Context: if ready go"));
    assert!(text.contains("Advice ERR-"));
    assert!(text.contains("No automatic recovery strategy found"));
    assert!(text.contains("System health: WARNING | Errors: 1"));
    assert!(text.contains("FAILED bad.sys"));
}

#[test]
fn test_compile_json_and_output_file() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "ok.sys", "func main() {\n    return 0;\n}\n");

    let output = sysc(
        temp_dir.path(),
        &["compile", "ok.sys", "--json", "-o", "ok.out"],
    );
    assert!(output.status.success());

    let text = stdout(&output);
    let json_end = text.rfind('}').unwrap();
    let value: serde_json::Value = serde_json::from_str(&text[..=json_end]).unwrap();
    assert_eq!(value["health"], "GOOD");
    assert_eq!(value["totalErrors"], 0);

    let written = fs::read_to_string(temp_dir.path().join("ok.out")).unwrap();
    assert_eq!(written, "func main() {\n return 0;\n}");
}

#[test]
fn test_batch_walks_directories() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "src/good.sys", "func main() { }");
    create_test_file(&temp_dir, "src/nested/bad.sys", "func 1");
    create_test_file(&temp_dir, "src/readme.txt", "func 1");

    let output = sysc(temp_dir.path(), &["batch", "src", "-j", "2"]);
    assert_eq!(output.status.code(), Some(1));

    let text = stdout(&output);
    assert!(text.contains("Files: 2 | Succeeded: 1 | Failed: 1"));
    assert!(text.contains("expected function name (line 1)"));
    assert!(!text.contains("readme.txt"));
}

#[test]
fn test_verbose_from_project_config_enables_debug_logging() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "a.sys", "x;");

    let quiet = sysc(temp_dir.path(), &["compile", "a.sys"]);
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("DEBUG"));

    create_test_file(&temp_dir, "sysc.toml", "verbose = true\n");
    let output = sysc(temp_dir.path(), &["compile", "a.sys"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DEBUG"));
    assert!(stderr.contains("verbose: true"));
}

#[test]
fn test_batch_extension_flag() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "src/good.sys", "func main() { }");
    create_test_file(&temp_dir, "src/other.lang", "func 1");

    let output = sysc(temp_dir.path(), &["batch", "src", "--ext", ".lang"]);
    assert_eq!(output.status.code(), Some(1));

    let text = stdout(&output);
    assert!(text.contains("Files: 1 | Succeeded: 0 | Failed: 1"));
    assert!(text.contains("other.lang"));
    assert!(!text.contains("good.sys"));
}
