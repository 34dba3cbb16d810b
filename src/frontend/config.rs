//! 编译配置
//!
//! 管理编译器配置选项：诊断容量、优化 pass 开关、分析阈值和批处理并发度。

use serde::{Deserialize, Serialize};

use crate::middle::analyzer::AnalyzerConfig;
use crate::middle::optimizer::{OptimizerConfig, Pass};
use crate::util::diagnostic::DEFAULT_MAX_ERRORS;

/// Label used when a source has no file name
pub const DEFAULT_FILE_NAME: &str = "<input>";

/// Default extension picked up when walking directories
pub const DEFAULT_EXTENSION: &str = "sys";

fn default_max_errors() -> usize {
    DEFAULT_MAX_ERRORS
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_max_parallel() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

/// 批处理配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// 最大并发任务数
    #[serde(default = "default_max_parallel")]
    pub max_parallel: usize,

    /// 目录遍历时匹配的扩展名
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_parallel: default_max_parallel(),
            extension: default_extension(),
        }
    }
}

/// 编译配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileConfig {
    /// 诊断容量（警告不计入）
    #[serde(default = "default_max_errors")]
    pub max_errors: usize,

    /// 诊断位置中使用的文件名
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// 是否启用详细日志
    #[serde(default)]
    pub verbose: bool,

    /// 优化 pass 开关
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// 静态分析阈值
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// 批处理配置
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            max_errors: default_max_errors(),
            file_name: default_file_name(),
            verbose: false,
            optimizer: OptimizerConfig::default(),
            analyzer: AnalyzerConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl CompileConfig {
    /// 创建默认配置
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置诊断容量
    #[inline]
    pub fn with_max_errors(
        mut self,
        max_errors: usize,
    ) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// 设置文件名
    #[inline]
    pub fn with_file_name(
        mut self,
        file_name: impl Into<String>,
    ) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// 开关单个优化 pass
    #[inline]
    pub fn with_pass(
        mut self,
        pass: Pass,
        enabled: bool,
    ) -> Self {
        self.optimizer = self.optimizer.with_pass(pass, enabled);
        self
    }

    /// 设置最大并发数（至少为 1）
    #[inline]
    pub fn with_max_parallel(
        mut self,
        max_parallel: usize,
    ) -> Self {
        self.batch.max_parallel = max_parallel.max(1);
        self
    }

    #[inline]
    pub fn with_extension(
        mut self,
        extension: impl Into<String>,
    ) -> Self {
        self.batch.extension = extension.into();
        self
    }

    /// 启用详细日志
    #[inline]
    pub fn verbose(
        mut self,
        verbose: bool,
    ) -> Self {
        self.verbose = verbose;
        self
    }
}
