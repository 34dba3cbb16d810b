//! sysc: a miniature source-processing pipeline
//!
//! Source text goes through a lenient scanner, a panic-mode recovering
//! parser, and an ordered set of text rewrite passes. A diagnostics store
//! collects failures and a recovery advisor proposes fixes. A static
//! analyzer reports coarse metrics and lints.
//!
//! # Example
//!
//! ```
//! let outcome = sysc::compile_source("const x = 5; y = x + 1;");
//! assert!(outcome.success);
//! assert_eq!(outcome.optimized, "const 5 = 5; y = 5 + 1;");
//! ```

#![doc(html_root_url = "https://docs.rs/sysc")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod batch;
pub mod frontend;
pub mod middle;

// Utility modules
pub mod util;

// Re-exports
pub use frontend::lexer::{tokenize, Token, TokenKind};
pub use frontend::parser::{parse, ParseError, ParseFailure, ParseOutcome};
pub use frontend::{CompileConfig, CompileError, CompileOutcome, Compiler};
pub use middle::analyzer::{analyze, AnalysisReport};
pub use middle::optimizer::{optimize, OptimizationStats};

use tracing::debug;

/// Tool version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name
pub const NAME: &str = "sysc";

/// Compile one buffer with the default configuration
///
/// Returns the success flag, every recorded message, and the optimized
/// text. The optimized text is produced even when parsing fails.
pub fn compile_source(source: &str) -> CompileOutcome {
    compile_source_with(source, CompileConfig::default())
}

/// [`compile_source`] with an explicit configuration
pub fn compile_source_with(
    source: &str,
    config: CompileConfig,
) -> CompileOutcome {
    debug!("compile_source called ({} bytes)", source.len());
    Compiler::with_config(source, config).run()
}
