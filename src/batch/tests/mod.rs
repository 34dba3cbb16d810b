//! Batch 单元测试

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tempfile::TempDir;

use crate::batch::*;
use crate::frontend::config::CompileConfig;

/// Records every target it was asked to build; fails targets for `windows`.
#[derive(Default)]
struct MockToolchain {
    invoked: Mutex<Vec<String>>,
    running: AtomicUsize,
    peak: AtomicUsize,
}

impl Toolchain for MockToolchain {
    fn invoke(
        &self,
        target: &str,
    ) -> TargetOutcome {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(5));
        self.running.fetch_sub(1, Ordering::SeqCst);

        self.invoked.lock().push(target.to_string());
        if target.starts_with("windows/") {
            TargetOutcome::failed(target, Duration::from_millis(10), "linker not found")
        } else {
            TargetOutcome::succeeded(target, Duration::from_millis(20), "ok")
        }
    }
}

fn targets(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod run_bounded_tests {
    use super::*;

    #[test]
    fn test_results_keep_input_order() {
        let items: Vec<u64> = (0..32).collect();
        let results = run_bounded(&items, 4, |n| {
            std::thread::sleep(Duration::from_millis(32 - n));
            n * 2
        })
        .unwrap();
        assert_eq!(results, items.iter().map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_collects_all_results_including_failures() {
        let items = vec![1, 2, 3, 4];
        let results: Vec<Result<i32, String>> = run_bounded(&items, 2, |n| {
            if n % 2 == 0 {
                Err(format!("task {} failed", n))
            } else {
                Ok(*n)
            }
        })
        .unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 2);
    }

    #[test]
    fn test_zero_parallelism_runs_sequentially() {
        let results = run_bounded(&[1, 2, 3], 0, |n| n + 1).unwrap();
        assert_eq!(results, vec![2, 3, 4]);
    }

    #[test]
    fn test_empty_input() {
        let results: Vec<i32> = run_bounded(&[] as &[i32], 3, |n| *n).unwrap();
        assert!(results.is_empty());
    }
}

#[cfg(test)]
mod toolchain_tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("linux/amd64"), Some(("linux", "amd64")));
        assert_eq!(parse_target("linux"), None);
        assert_eq!(parse_target("linux/amd64/v2"), None);
        assert_eq!(parse_target("/amd64"), None);
    }

    #[test]
    fn test_build_targets_collects_every_outcome() {
        let toolchain = MockToolchain::default();
        let names = targets(&["linux/amd64", "windows/amd64", "darwin/arm64", "bogus"]);

        let outcomes = build_targets(&toolchain, &names, 2).unwrap();
        let flags: Vec<bool> = outcomes.iter().map(|o| o.success).collect();
        assert_eq!(flags, vec![true, false, true, false]);
        assert_eq!(outcomes[3].target, "bogus");
        assert!(outcomes[3].error.as_deref().unwrap().contains("invalid target format"));

        // The malformed target never reached the toolchain.
        let mut invoked = toolchain.invoked.lock().clone();
        invoked.sort();
        assert_eq!(invoked, vec!["darwin/arm64", "linux/amd64", "windows/amd64"]);
    }

    #[test]
    fn test_build_targets_respects_bound() {
        let toolchain = MockToolchain::default();
        let names: Vec<String> = (0..8).map(|i| format!("linux/arch{}", i)).collect();

        build_targets(&toolchain, &names, 2).unwrap();
        assert!(toolchain.peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(toolchain.invoked.lock().len(), 8);
    }

    #[test]
    fn test_build_summary() {
        let toolchain = MockToolchain::default();
        let names = targets(&["linux/amd64", "windows/amd64", "darwin/arm64"]);
        let outcomes = build_targets(&toolchain, &names, 3).unwrap();

        let summary = BuildSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_duration, Duration::from_millis(50));
        assert_eq!(summary.average_duration, Duration::from_millis(50) / 3);
        assert!(summary.to_string().starts_with("Builds: 3 | Succeeded: 2 | Failed: 1"));
    }

    #[test]
    fn test_empty_summary_has_zero_average() {
        let summary = BuildSummary::from_outcomes(&[]);
        assert_eq!(summary, BuildSummary::default());
        assert_eq!(summary.average_duration, Duration::ZERO);
    }
}

#[cfg(test)]
mod compile_files_tests {
    use super::*;

    fn write(
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

    #[test]
    fn test_collect_sources_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.sys", "x;");
        write(&dir, "nested/b.sys", "y;");
        write(&dir, "notes.txt", "z");

        let files = collect_sources(&[dir.path().to_path_buf()], "sys").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.sys", "b.sys"]);
    }

    #[test]
    fn test_explicit_files_are_kept() {
        let dir = TempDir::new().unwrap();
        let txt = write(&dir, "notes.txt", "z");
        let files = collect_sources(&[txt.clone(), txt.clone()], "sys").unwrap();
        assert_eq!(files, vec![txt]);
    }

    #[test]
    fn test_compile_files_shares_one_store() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "good.sys", "func main() { return 0; }\n");
        let bad = write(&dir, "bad.sys", "func { }\n");
        let missing = dir.path().join("missing.sys");

        let config = CompileConfig::new().with_max_parallel(2);
        let report = compile_files(&[good.clone(), bad.clone(), missing.clone()], &config).unwrap();

        assert_eq!(report.files.len(), 3);
        assert_eq!(report.files[0].path, good);
        assert!(report.files[0].is_success());
        assert!(!report.files[1].is_success());
        assert!(report.files[2].result.is_err());
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 2);

        let recorded = report.store.by_file(&bad.display().to_string());
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].message, "expected function name (line 1)");
        assert_eq!(report.store.error_count(), 1);
    }

    #[test]
    fn test_compile_files_respects_store_capacity() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..4)
            .map(|i| write(&dir, &format!("f{}.sys", i), "func 1\nfunc 2\n"))
            .collect();

        let config = CompileConfig::new().with_max_errors(3);
        let report = compile_files(&paths, &config).unwrap();

        assert_eq!(report.failed(), 4);
        assert_eq!(report.store.error_count(), 3);
    }
}
