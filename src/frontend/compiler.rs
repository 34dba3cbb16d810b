//! 编译器核心
//!
//! Runs scanner → parser → optimizer over one working buffer. A parse
//! failure is the only terminal error; the optimizer runs regardless and
//! its output replaces the buffer. State sits behind reader/writer locks so
//! a finished compiler can be inspected from other threads.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::CompileConfig;
use super::lexer::{tokenize, Token};
use super::parser::{ParseFailure, Parser};
use crate::middle::optimizer::{OptimizationStats, OptimizeError, Optimizer};
use crate::util::diagnostic::{Diagnostic, DiagnosticsStore, ErrorLocation, Severity};
use crate::util::span::SourceFile;

/// 编译错误
#[derive(Debug, Error)]
pub enum CompileError {
    /// 语法分析错误
    #[error(transparent)]
    Parse(#[from] ParseFailure),

    /// 优化错误
    #[error("optimization failed: {0}")]
    Optimize(#[from] OptimizeError),
}

/// Aggregate result of one compile: success flag, messages, optimized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    pub success: bool,
    /// Every recorded message, in encounter order
    pub diagnostics: Vec<String>,
    pub optimized: String,
    pub stats: OptimizationStats,
}

/// 编译器
///
/// # 示例
///
/// ```
/// use sysc::frontend::Compiler;
///
/// let compiler = Compiler::new("func main() { return 0; }");
/// assert!(compiler.compile().is_ok());
/// assert_eq!(compiler.output(), "func main() { return 0; }");
/// ```
#[derive(Debug)]
pub struct Compiler {
    config: CompileConfig,
    source: SourceFile,
    buffer: RwLock<String>,
    tokens: RwLock<Vec<Token>>,
    errors: RwLock<Vec<String>>,
    stats: RwLock<OptimizationStats>,
    store: Option<Arc<DiagnosticsStore>>,
}

impl Compiler {
    /// 创建新编译器
    #[inline]
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_config(source, CompileConfig::new())
    }

    /// 使用配置创建编译器
    pub fn with_config(
        source: impl Into<String>,
        config: CompileConfig,
    ) -> Self {
        let source = SourceFile::new(config.file_name.clone(), source);
        Self {
            buffer: RwLock::new(source.content.clone()),
            source,
            config,
            tokens: RwLock::new(Vec::new()),
            errors: RwLock::new(Vec::new()),
            stats: RwLock::new(OptimizationStats::default()),
            store: None,
        }
    }

    /// Also record parse failures into a shared diagnostics store
    pub fn with_store(
        mut self,
        store: Arc<DiagnosticsStore>,
    ) -> Self {
        self.store = Some(store);
        self
    }

    /// Run the pipeline.
    ///
    /// Returns the parse failure, if any, after the optimizer has run and
    /// the buffer has been replaced. Errors and counters of an earlier
    /// compile are discarded.
    pub fn compile(&self) -> Result<(), CompileError> {
        self.errors.write().clear();
        *self.stats.write() = OptimizationStats::default();

        let source = self.buffer.read().clone();
        debug!("Compiling {} ({} bytes)", self.source.name, source.len());

        let tokens = tokenize(&source);
        let parsed = Parser::new(&tokens).parse();
        *self.tokens.write() = tokens;

        if let Err(failure) = &parsed {
            self.record_parse_failure(failure);
        }

        let mut optimizer = Optimizer::with_config(&self.config.optimizer);
        match optimizer.optimize(&source) {
            Ok(optimized) => {
                *self.buffer.write() = optimized;
                *self.stats.write() = *optimizer.stats();
            }
            Err(error) => {
                // Not terminal: the buffer keeps the unoptimized text.
                let error = CompileError::from(error);
                warn!("{}", error);
                self.errors.write().push(error.to_string());
            }
        }

        match parsed {
            Ok(()) => {
                info!("Compiled {}", self.source.name);
                Ok(())
            }
            Err(failure) => {
                info!(
                    "Compilation of {} failed with {} errors",
                    self.source.name,
                    failure.messages().len()
                );
                Err(CompileError::Parse(failure))
            }
        }
    }

    fn record_parse_failure(
        &self,
        failure: &ParseFailure,
    ) {
        let mut errors = self.errors.write();
        let mut store_full = false;

        for (line, message) in failure.entries() {
            errors.push(message.to_string());

            let Some(store) = self.store.as_ref().filter(|_| !store_full) else {
                continue;
            };

            let location = ErrorLocation::new(self.source.name.clone(), line, 1);
            let context = self.source.line(line).map(str::trim).unwrap_or_default();
            let diagnostic =
                Diagnostic::new(Severity::Error, message, location).with_context(context);

            if let Err(error) = store.record_diagnostic(diagnostic) {
                warn!("{}: {}", self.source.name, error);
                store_full = true;
            }
        }
    }

    /// Current working buffer (optimized after a compile)
    pub fn output(&self) -> String {
        self.buffer.read().clone()
    }

    /// Tokens of the last compile
    pub fn tokens(&self) -> Vec<Token> {
        self.tokens.read().clone()
    }

    /// Messages recorded by the last compile
    pub fn errors(&self) -> Vec<String> {
        self.errors.read().clone()
    }

    /// Optimizer counters of the last compile
    pub fn stats(&self) -> OptimizationStats {
        *self.stats.read()
    }

    /// Compile and collect everything into one value
    pub fn run(&self) -> CompileOutcome {
        let success = self.compile().is_ok();
        CompileOutcome {
            success,
            diagnostics: self.errors(),
            optimized: self.output(),
            stats: self.stats(),
        }
    }
}
