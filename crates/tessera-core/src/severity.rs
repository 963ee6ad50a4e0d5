//! Severity levels for migration messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The severity of a message recorded against a migration run.
///
/// - [`Severity::Error`] marks a row that could not be migrated
/// - [`Severity::Warning`] marks a row that was migrated with parts skipped
/// - [`Severity::Info`] is purely informational
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_text_forms_agree() {
        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            let json = serde_json::to_value(severity).expect("Failed to serialize");
            assert_eq!(json, severity.to_string());
        }
    }
}
