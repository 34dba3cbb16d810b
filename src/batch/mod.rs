//! Batch execution
//!
//! Fan-out at the edges of the pipeline: compiling many files, and handing
//! build targets to an external toolchain. Both go through
//! [`run_bounded`], a bounded task group that waits for every task and
//! returns all results in input order. A failing task never cancels the
//! others.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::frontend::compiler::{CompileOutcome, Compiler};
use crate::frontend::config::CompileConfig;
use crate::util::diagnostic::DiagnosticsStore;

#[cfg(test)]
mod tests;

/// 批处理错误
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Run `f` over `items` with at most `max_parallel` tasks at a time.
///
/// Joins every task before returning; results keep the order of `items`.
/// A `max_parallel` of zero is treated as one.
pub fn run_bounded<T, R, F>(
    items: &[T],
    max_parallel: usize,
    f: F,
) -> Result<Vec<R>, BatchError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    let workers = max_parallel.max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("sysc-worker-{}", i))
        .build()?;

    debug!("Running {} tasks on {} workers", items.len(), workers);
    Ok(pool.install(|| items.par_iter().map(f).collect()))
}

/// Expand directories into the files below them that carry `extension`.
///
/// Paths that are not directories are kept as given. The result is sorted
/// and free of duplicates.
pub fn collect_sources(
    paths: &[PathBuf],
    extension: &str,
) -> Result<Vec<PathBuf>, BatchError> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path).follow_links(false) {
            let entry = entry.map_err(|source| BatchError::Walk {
                path: path.clone(),
                source,
            })?;
            let is_match = entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some(extension);
            if is_match {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Per-file result of a batch compile
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// `Err` holds the read failure; the file never reached the compiler
    pub result: Result<CompileOutcome, String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(&self.result, Ok(outcome) if outcome.success)
    }
}

/// Everything a batch compile produced
#[derive(Debug)]
pub struct BatchReport {
    pub files: Vec<FileOutcome>,
    /// Parse failures of every file, shared by all tasks
    pub store: Arc<DiagnosticsStore>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }
}

fn compile_file(
    path: &Path,
    config: &CompileConfig,
    store: &Arc<DiagnosticsStore>,
) -> FileOutcome {
    let result = match fs::read_to_string(path) {
        Ok(source) => {
            let config = config.clone().with_file_name(path.display().to_string());
            let compiler = Compiler::with_config(source, config).with_store(store.clone());
            Ok(compiler.run())
        }
        Err(error) => {
            warn!("Cannot read {}: {}", path.display(), error);
            Err(error.to_string())
        }
    };

    FileOutcome {
        path: path.to_path_buf(),
        result,
    }
}

/// Compile each file in its own task, recording parse failures into one
/// shared store sized by `config.max_errors`.
pub fn compile_files(
    paths: &[PathBuf],
    config: &CompileConfig,
) -> Result<BatchReport, BatchError> {
    let store = Arc::new(DiagnosticsStore::new(config.max_errors));
    let files = run_bounded(paths, config.batch.max_parallel, |path| {
        compile_file(path, config, &store)
    })?;

    let report = BatchReport { files, store };
    info!(
        "Batch compiled {} files: {} ok, {} failed",
        report.files.len(),
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

/// Result of one toolchain invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    pub target: String,
    pub success: bool,
    pub duration: Duration,
    pub output: String,
    pub error: Option<String>,
}

impl TargetOutcome {
    pub fn succeeded(
        target: impl Into<String>,
        duration: Duration,
        output: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            success: true,
            duration,
            output: output.into(),
            error: None,
        }
    }

    pub fn failed(
        target: impl Into<String>,
        duration: Duration,
        error: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            success: false,
            duration,
            output: String::new(),
            error: Some(error.into()),
        }
    }
}

/// External build toolchain, invoked once per target
pub trait Toolchain: Sync {
    fn invoke(
        &self,
        target: &str,
    ) -> TargetOutcome;
}

/// Split an `os/arch` target name
pub fn parse_target(target: &str) -> Option<(&str, &str)> {
    let mut parts = target.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(os), Some(arch), None) if !os.is_empty() && !arch.is_empty() => Some((os, arch)),
        _ => None,
    }
}

/// Invoke the toolchain for every target.
///
/// Malformed target names fail without reaching the toolchain.
pub fn build_targets<T>(
    toolchain: &T,
    targets: &[String],
    max_parallel: usize,
) -> Result<Vec<TargetOutcome>, BatchError>
where
    T: Toolchain + ?Sized,
{
    run_bounded(targets, max_parallel, |target| {
        if parse_target(target).is_none() {
            return TargetOutcome::failed(
                target.as_str(),
                Duration::ZERO,
                format!("invalid target format: {} (expected os/arch)", target),
            );
        }

        let started = Instant::now();
        let mut outcome = toolchain.invoke(target);
        if outcome.duration.is_zero() {
            outcome.duration = started.elapsed();
        }
        debug!("Target {} finished: success={}", target, outcome.success);
        outcome
    })
}

/// Aggregate over a set of target outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration: Duration,
    /// Zero when there are no outcomes
    pub average_duration: Duration,
}

impl BuildSummary {
    pub fn from_outcomes(outcomes: &[TargetOutcome]) -> Self {
        let total = outcomes.len();
        let succeeded = outcomes.iter().filter(|o| o.success).count();
        let total_duration: Duration = outcomes.iter().map(|o| o.duration).sum();
        let average_duration = u32::try_from(total)
            .ok()
            .filter(|n| *n > 0)
            .map(|n| total_duration / n)
            .unwrap_or_default();

        Self {
            total,
            succeeded,
            failed: total - succeeded,
            total_duration,
            average_duration,
        }
    }
}

impl fmt::Display for BuildSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "Builds: {} | Succeeded: {} | Failed: {} | Total: {:?} | Average: {:?}",
            self.total, self.succeeded, self.failed, self.total_duration, self.average_duration
        )
    }
}
