//! 文本优化器
//!
//! Rewrites the source text through an ordered list of passes:
//!
//! 1. blank-line removal
//! 2. comment stripping
//! 3. whitespace normalization
//! 4. heuristic dead-code removal
//! 5. constant folding
//!
//! Every pass works on the output of the previous one. Statistics
//! accumulate over the lifetime of one [`Optimizer`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub mod passes;


/// Rewrite counters for one optimizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationStats {
    /// Counts the lines the blank-line pass *kept*, not the ones it dropped.
    pub lines_removed: usize,
    pub comments_removed: usize,
    pub whitespace_trimmed: usize,
    pub dead_code_removed: usize,
    pub constants_folded: usize,
}

impl fmt::Display for OptimizationStats {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "lines={} comments={} whitespace={} dead_code={} constants={}",
            self.lines_removed,
            self.comments_removed,
            self.whitespace_trimmed,
            self.dead_code_removed,
            self.constants_folded
        )
    }
}

/// Optimizer failure
///
/// None of the built-in passes can reach this: constant names are `\w+` and
/// always form a valid pattern.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    #[error("invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Rewrite passes, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    EmptyLines,
    Comments,
    Whitespace,
    DeadCode,
    Constants,
}

impl Pass {
    pub const ALL: [Pass; 5] = [
        Pass::EmptyLines,
        Pass::Comments,
        Pass::Whitespace,
        Pass::DeadCode,
        Pass::Constants,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pass::EmptyLines => "empty_lines",
            Pass::Comments => "comments",
            Pass::Whitespace => "whitespace",
            Pass::DeadCode => "dead_code",
            Pass::Constants => "constants",
        }
    }

    #[inline]
    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Pass {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-pass enable switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub empty_lines: bool,
    pub comments: bool,
    pub whitespace: bool,
    pub dead_code: bool,
    pub constants: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            empty_lines: true,
            comments: true,
            whitespace: true,
            dead_code: true,
            constants: true,
        }
    }
}

impl OptimizerConfig {
    pub fn is_enabled(
        &self,
        pass: Pass,
    ) -> bool {
        match pass {
            Pass::EmptyLines => self.empty_lines,
            Pass::Comments => self.comments,
            Pass::Whitespace => self.whitespace,
            Pass::DeadCode => self.dead_code,
            Pass::Constants => self.constants,
        }
    }

    pub fn with_pass(
        mut self,
        pass: Pass,
        enabled: bool,
    ) -> Self {
        match pass {
            Pass::EmptyLines => self.empty_lines = enabled,
            Pass::Comments => self.comments = enabled,
            Pass::Whitespace => self.whitespace = enabled,
            Pass::DeadCode => self.dead_code = enabled,
            Pass::Constants => self.constants = enabled,
        }
        self
    }
}

/// 文本优化器
#[derive(Debug, Clone)]
pub struct Optimizer {
    enabled: [bool; 5],
    stats: OptimizationStats,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer {
    /// All passes enabled
    pub fn new() -> Self {
        Self::with_config(&OptimizerConfig::default())
    }

    pub fn with_config(config: &OptimizerConfig) -> Self {
        let mut enabled = [true; 5];
        for pass in Pass::ALL {
            enabled[pass.index()] = config.is_enabled(pass);
        }
        Self {
            enabled,
            stats: OptimizationStats::default(),
        }
    }

    /// Switch one pass on or off. Disabled passes leave their counter alone.
    pub fn set_pass(
        &mut self,
        pass: Pass,
        enabled: bool,
    ) {
        self.enabled[pass.index()] = enabled;
    }

    #[inline]
    pub fn is_enabled(
        &self,
        pass: Pass,
    ) -> bool {
        self.enabled[pass.index()]
    }

    /// Counters accumulated over every `optimize` call on this optimizer
    #[inline]
    pub fn stats(&self) -> &OptimizationStats {
        &self.stats
    }

    /// Run the enabled passes in order.
    pub fn optimize(
        &mut self,
        source: &str,
    ) -> Result<String, OptimizeError> {
        let mut result = source.to_string();

        for pass in Pass::ALL {
            if !self.is_enabled(pass) {
                continue;
            }
            result = self.run_pass(pass, &result)?;
        }

        debug!(
            "Optimized {} -> {} bytes ({})",
            source.len(),
            result.len(),
            self.stats
        );
        Ok(result)
    }

    fn run_pass(
        &mut self,
        pass: Pass,
        source: &str,
    ) -> Result<String, OptimizeError> {
        let stats = &mut self.stats;
        Ok(match pass {
            Pass::EmptyLines => passes::remove_empty_lines(source, stats),
            Pass::Comments => passes::remove_comments(source, stats),
            Pass::Whitespace => passes::normalize_whitespace(source, stats),
            Pass::DeadCode => passes::remove_dead_code(source, stats),
            Pass::Constants => passes::fold_constants(source, stats)?,
        })
    }
}

/// One-shot optimize with every pass enabled
pub fn optimize(source: &str) -> Result<(String, OptimizationStats), OptimizeError> {
    let mut optimizer = Optimizer::new();
    let output = optimizer.optimize(source)?;
    Ok((output, *optimizer.stats()))
}
