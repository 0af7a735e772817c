//! Error families for matrix construction, permutations, plans and reports.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and key/value context carried by every [`ApdError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code such as `not-square` or `empty-range`.
    pub code: String,
    /// Diagnostic text.
    pub message: String,
    /// Offending sizes, indices and values, rendered as strings.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, when one is obvious.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key = value`; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.context.is_empty() {
            let pairs = self
                .context
                .iter()
                .format_with(", ", |(key, value), g| g(&format_args!("{key}={value}")));
            write!(f, " ({pairs})")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Error type shared by every APD crate, tagged by family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail", rename_all = "lowercase")]
pub enum ApdError {
    /// Ragged or non-square rows, unparsable entries.
    #[error("matrix: {0}")]
    Matrix(ErrorInfo),
    /// Images that do not form a bijection, mismatched lengths.
    #[error("permutation: {0}")]
    Permutation(ErrorInfo),
    /// Invalid experiment plans and unknown sizes.
    #[error("config: {0}")]
    Config(ErrorInfo),
    /// Empty draw ranges and degenerate weights.
    #[error("rng: {0}")]
    Rng(ErrorInfo),
    /// JSON and YAML encoding failures.
    #[error("serde: {0}")]
    Serde(ErrorInfo),
}

impl ApdError {
    /// Payload regardless of family.
    pub fn info(&self) -> &ErrorInfo {
        self.parts().1
    }

    /// Shorthand for `self.info().code`.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Lowercase family label, matching the serialized `family` tag.
    pub fn family(&self) -> &'static str {
        self.parts().0
    }

    fn parts(&self) -> (&'static str, &ErrorInfo) {
        match self {
            ApdError::Matrix(info) => ("matrix", info),
            ApdError::Permutation(info) => ("permutation", info),
            ApdError::Config(info) => ("config", info),
            ApdError::Rng(info) => ("rng", info),
            ApdError::Serde(info) => ("serde", info),
        }
    }
}
