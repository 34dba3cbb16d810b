//! Recovery advisor
//!
//! Looks up a fix suggestion for a diagnostic. Strategies form a fixed,
//! explicitly ordered registry; the first strategy whose predicate accepts
//! the message wins.

use serde::Serialize;

use super::error::Diagnostic;

/// Suggestion returned when no strategy matches
pub const NO_STRATEGY_FOUND: &str = "No automatic recovery strategy found";

/// Known recovery strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecoveryStrategy {
    MissingSemicolon,
    UndefinedVariable,
    TypeMismatch,
}

impl RecoveryStrategy {
    /// Registry in priority order
    pub const ALL: [RecoveryStrategy; 3] = [
        RecoveryStrategy::MissingSemicolon,
        RecoveryStrategy::UndefinedVariable,
        RecoveryStrategy::TypeMismatch,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RecoveryStrategy::MissingSemicolon => "missing_semicolon",
            RecoveryStrategy::UndefinedVariable => "undefined_var",
            RecoveryStrategy::TypeMismatch => "type_mismatch",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecoveryStrategy::MissingSemicolon => "Missing Semicolon",
            RecoveryStrategy::UndefinedVariable => "Undefined Variable",
            RecoveryStrategy::TypeMismatch => "Type Mismatch",
        }
    }

    /// Substring test on the message (case-sensitive)
    pub fn matches(
        &self,
        message: &str,
    ) -> bool {
        let needle = match self {
            RecoveryStrategy::MissingSemicolon => "semicolon",
            RecoveryStrategy::UndefinedVariable => "undefined",
            RecoveryStrategy::TypeMismatch => "type",
        };
        message.contains(needle)
    }

    pub fn suggest(
        &self,
        _diagnostic: &Diagnostic,
    ) -> String {
        match self {
            RecoveryStrategy::MissingSemicolon => "Add ';' at the end of the line",
            RecoveryStrategy::UndefinedVariable => {
                "Declare the variable or check the binding it refers to"
            }
            RecoveryStrategy::TypeMismatch => "Make the types compatible or add an explicit cast",
        }
        .to_string()
    }

    /// Whether the suggestion can be applied without review
    pub fn is_automatic(&self) -> bool {
        matches!(self, RecoveryStrategy::MissingSemicolon)
    }
}

/// Result of an advisor lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    /// `None` is the not-found sentinel
    pub strategy: Option<RecoveryStrategy>,
    pub automatic: bool,
    pub suggestion: String,
}

impl Advice {
    #[inline]
    pub fn is_found(&self) -> bool {
        self.strategy.is_some()
    }

    fn not_found() -> Self {
        Self {
            strategy: None,
            automatic: false,
            suggestion: NO_STRATEGY_FOUND.to_string(),
        }
    }
}

/// First-match lookup over an ordered strategy list
#[derive(Debug, Clone)]
pub struct RecoveryAdvisor {
    strategies: Vec<RecoveryStrategy>,
}

impl Default for RecoveryAdvisor {
    fn default() -> Self {
        Self {
            strategies: RecoveryStrategy::ALL.to_vec(),
        }
    }
}

impl RecoveryAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry in lookup order
    pub fn strategies(&self) -> &[RecoveryStrategy] {
        &self.strategies
    }

    pub fn advise(
        &self,
        diagnostic: &Diagnostic,
    ) -> Advice {
        self.strategies
            .iter()
            .find(|s| s.matches(&diagnostic.message))
            .map(|s| Advice {
                strategy: Some(*s),
                automatic: s.is_automatic(),
                suggestion: s.suggest(diagnostic),
            })
            .unwrap_or_else(Advice::not_found)
    }
}
