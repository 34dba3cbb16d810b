//! 统一诊断系统
//!
//! 错误收集、恢复建议和诊断渲染
//!
//! # 模块结构
//!
//! - [`error`] - 诊断数据结构 (Diagnostic, Severity, ErrorLocation)
//! - [`store`] - 线程安全的错误收集器
//! - [`recovery`] - 修复建议查找
//! - [`report`] - 汇总报告
//! - [`emitter`] - 文本与 JSON 渲染
//!
//! # 示例
//!
//! ```
//! use sysc::util::diagnostic::{DiagnosticsStore, ErrorLocation, Severity};
//!
//! let store = DiagnosticsStore::new(10);
//! store
//!     .record(Severity::Error, "expected '{'", ErrorLocation::new("main.sys", 3, 1))
//!     .unwrap();
//! assert_eq!(store.error_count(), 1);
//! println!("{}", store.render());
//! ```

pub mod emitter;
pub mod error;
pub mod recovery;
pub mod report;
pub mod store;

// 重新导出
pub use emitter::{EmitterConfig, JsonEmitter, TextEmitter};
pub use error::{Diagnostic, DiagnosticError, ErrorLocation, Severity};
pub use recovery::{Advice, RecoveryAdvisor, RecoveryStrategy, NO_STRATEGY_FOUND};
pub use report::{DiagnosticReport, Health};
pub use store::{DiagnosticsStore, DEFAULT_MAX_ERRORS};
