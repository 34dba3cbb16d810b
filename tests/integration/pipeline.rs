//! End-to-end tests for the scan → parse → optimize pipeline

use sysc::frontend::lexer::TokenKind;
use sysc::{analyze, compile_source, optimize, parse, tokenize, CompileError, Compiler};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|t| t.kind).collect()
}

#[test]
fn test_empty_input_is_single_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

/// Five tokens: the trailing EOF counts
#[test]
fn test_assignment_token_count() {
    let tokens = tokenize("x = 10;");
    assert_eq!(tokens.len(), 5);
    assert_eq!(
        kinds("x = 10;"),
        vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Int,
            TokenKind::Semicolon,
            TokenKind::Eof
        ]
    );
    assert_eq!(tokens[2].literal, "10");
}

#[test]
fn test_bang_is_distinct_from_not_equal() {
    assert_eq!(kinds("!"), vec![TokenKind::Bang, TokenKind::Eof]);
    assert_eq!(kinds("!="), vec![TokenKind::NotEq, TokenKind::Eof]);
}

#[test]
fn test_function_declaration_tokens() {
    // 14 tokens plus EOF
    assert_eq!(tokenize("func add(a, b) { return a + b; }").len(), 15);
}

#[test]
fn test_balanced_blocks_with_nonsense_expressions_parse() {
    let source = "func f(=== ,, ) { + + + { - } * } if ! { ; ; }";
    assert!(parse(&tokenize(source)).is_success());
}

/// Conditions are a single token, so a parenthesized condition is rejected
#[test]
fn test_parenthesized_condition_is_rejected() {
    let outcome = parse(&tokenize("if (x > 0) { return x; }"));
    assert_eq!(
        outcome.messages(),
        vec!["expected '{' after if condition (line 1)"]
    );
}

#[test]
fn test_optimize_strips_comments() {
    let source = "x = 1; // trailing\n/* block */\ny = 2;";
    let (output, stats) = optimize(source).unwrap();
    assert!(output.len() < source.len());
    assert!(stats.comments_removed > 0);
    assert_eq!(output, "x = 1;\n\ny = 2;");
}

#[test]
fn test_constant_folding_is_literal() {
    let (output, _) = optimize("const x = 5; y = x + 1;").unwrap();
    assert_eq!(output, "const 5 = 5; y = 5 + 1;");
}

#[test]
fn test_compile_source_reports_all_messages() {
    let outcome = compile_source("func {\n}\nif x y\nfunc f( { }");
    assert!(!outcome.success);
    assert_eq!(
        outcome.diagnostics,
        vec![
            "expected function name (line 1)",
            "expected '{' after if condition (line 3)",
            "expected '{' (line 4)",
        ]
    );
}

#[test]
fn test_compile_keeps_going_through_unknown_characters() {
    let source = "
		func main() {
			x := 10
			if x > 0 {
				return x
			}
		}
	";
    let compiler = Compiler::new(source);
    assert!(compiler.compile().is_ok());
    assert!(!compiler.output().is_empty());
}

#[test]
fn test_compile_error_lists_every_line() {
    let err = Compiler::new("func 1\nfunc 2").compile().unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
    assert_eq!(
        err.to_string(),
        "parse errors:\nexpected function name (line 1)\nexpected function name (line 2)"
    );
}

#[test]
fn test_analyzer_on_optimized_output() {
    let outcome = compile_source("func f() {\n  if a { }\n  for ; ; { }\n}\n");
    assert!(outcome.success);

    let report = analyze(&outcome.optimized);
    assert_eq!(report.metrics.functions, 1);
    assert_eq!(report.metrics.branches, 2);
    assert_eq!(report.metrics.complexity, 1.0);
}
