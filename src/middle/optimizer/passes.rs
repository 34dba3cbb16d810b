//! Text rewrite passes
//!
//! Each pass takes a buffer, returns the rewritten buffer, and bumps its own
//! counter in [`OptimizationStats`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{OptimizationStats, OptimizeError};

static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//[^\n]*").unwrap());
static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static AFTER_RETURN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)return\s+.*?\n\s+.*?\n").unwrap());
static CONST_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"const\s+((?-u:\w)+)\s*=\s*([0-9]+)").unwrap());

/// Drop lines that are empty after trimming.
///
/// `lines_removed` is bumped once per *retained* line.
pub fn remove_empty_lines(
    source: &str,
    stats: &mut OptimizationStats,
) -> String {
    let kept: Vec<&str> = source
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    stats.lines_removed += kept.len();
    kept.join("\n")
}

/// Strip `//` line comments, then `/* */` block comments (non-nested).
///
/// The counter grows by the number of opening markers found in the input,
/// counted before anything is stripped.
pub fn remove_comments(
    source: &str,
    stats: &mut OptimizationStats,
) -> String {
    let result = LINE_COMMENT.replace_all(source, "");
    stats.comments_removed += source.matches("//").count();

    let result = BLOCK_COMMENT.replace_all(&result, "").into_owned();
    stats.comments_removed += source.matches("/*").count();

    result
}

/// Collapse space/tab runs to one space, then trim trailing space/tab.
pub fn normalize_whitespace(
    source: &str,
    stats: &mut OptimizationStats,
) -> String {
    let collapsed = SPACE_RUN.replace_all(source, " ");

    let lines: Vec<&str> = collapsed
        .split('\n')
        .map(|line| {
            let trimmed = line.trim_end_matches([' ', '\t']);
            stats.whitespace_trimmed += line.len() - trimmed.len();
            trimmed
        })
        .collect();

    lines.join("\n")
}

/// Drop the line right after a `return` line.
///
/// Pattern based, with no notion of blocks: a closing brace following a
/// `return` is dropped just like real dead code.
pub fn remove_dead_code(
    source: &str,
    stats: &mut OptimizationStats,
) -> String {
    AFTER_RETURN
        .replace_all(source, |caps: &Captures<'_>| {
            let matched = &caps[0];
            let mut lines = matched.split('\n');
            match (lines.next(), lines.next()) {
                (Some(first), Some(_)) => {
                    stats.dead_code_removed += 1;
                    format!("{}\n", first)
                }
                _ => matched.to_string(),
            }
        })
        .into_owned()
}

/// Replace every whole-word use of `const NAME = <int>` names with the value.
///
/// Scope-unaware: the declaration itself is rewritten too, so
/// `const x = 5; y = x + 1;` becomes `const 5 = 5; y = 5 + 1;`.
/// Names, digits and word boundaries are ASCII only.
pub fn fold_constants(
    source: &str,
    stats: &mut OptimizationStats,
) -> Result<String, OptimizeError> {
    let mut result = source.to_string();

    for caps in CONST_DECL.captures_iter(source) {
        let name = &caps[1];
        let value = &caps[2];

        let usage = Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(name)))?;
        if usage.is_match(&result) {
            result = usage.replace_all(&result, value).into_owned();
            stats.constants_folded += 1;
        }
    }

    Ok(result)
}
