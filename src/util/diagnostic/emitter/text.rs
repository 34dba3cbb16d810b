//! 诊断渲染器

use std::fmt::Write;

use crate::util::diagnostic::Diagnostic;

/// Placeholder rendered for an empty store
pub const NO_DIAGNOSTICS: &str = "No diagnostics";

/// 渲染器配置
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// 是否显示上下文
    pub show_context: bool,
    /// 是否显示修复建议
    pub show_suggestion: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            show_context: true,
            show_suggestion: true,
        }
    }
}

/// 文本诊断渲染器
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    /// 创建新的文本渲染器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义配置创建渲染器
    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// Errors section, warnings section, totals line
    pub fn render_groups(
        &self,
        errors: &[Diagnostic],
        warnings: &[Diagnostic],
    ) -> String {
        if errors.is_empty() && warnings.is_empty() {
            return NO_DIAGNOSTICS.to_string();
        }

        let mut output = String::new();

        if !errors.is_empty() {
            output.push_str("=== ERRORS ===\n");
            for error in errors {
                output.push_str(&self.render(error));
            }
            output.push('\n');
        }

        if !warnings.is_empty() {
            output.push_str("=== WARNINGS ===\n");
            for warning in warnings {
                output.push_str(&self.render(warning));
            }
            output.push('\n');
        }

        let _ = writeln!(
            output,
            "Total: {} errors, {} warnings",
            errors.len(),
            warnings.len()
        );
        output
    }

    /// 渲染单个诊断
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "[{}] {}", diagnostic.severity, diagnostic.id);
        let _ = writeln!(output, "  File: {}", diagnostic.location);
        let _ = writeln!(output, "  Message: {}", diagnostic.message);

        if self.config.show_context && !diagnostic.context.is_empty() {
            let _ = writeln!(output, "  Context: {}", diagnostic.context);
        }

        if self.config.show_suggestion && diagnostic.fixable {
            if let Some(suggestion) = diagnostic.suggestion.as_deref().filter(|s| !s.is_empty()) {
                let _ = writeln!(output, "  Suggestion: {}", suggestion);
            }
        }

        output.push('\n');
        output
    }
}
