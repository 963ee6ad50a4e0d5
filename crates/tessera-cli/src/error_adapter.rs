//! Error adapter for converting TesseraError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use tessera::{ConfigurationError, TesseraError};

/// Adapter for [`TesseraError`] variants.
pub struct ErrorAdapter<'a>(pub &'a TesseraError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TesseraError::Io(_) => "tessera::io",
            TesseraError::Json(_) => "tessera::json",
            TesseraError::MissingDependency(_) => "tessera::missing_dependency",
            TesseraError::Resolution(_) => "tessera::resolution",
            TesseraError::Configuration(_) => "tessera::configuration",
            TesseraError::Backend(_) => "tessera::backend",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TesseraError::Configuration(ConfigurationError::MissingKey { key, .. }) => {
                format!("set `paragraphs.{key}` in the configuration file")
            }
            TesseraError::Configuration(ConfigurationError::InvalidDefaultLayout {
                bundle,
                ..
            }) => format!("check the stored default layout of bundle `{bundle}`"),
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub struct Reportable<'a>(ErrorAdapter<'a>);

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.help()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.0.labels()
    }
}

/// Convert a [`TesseraError`] into a list of reportable errors.
pub fn to_reportables(err: &TesseraError) -> Vec<Reportable<'_>> {
    vec![Reportable(ErrorAdapter(err))]
}

#[cfg(test)]
mod tests {
    use tessera::{ResolutionError, identifier::EntityId};

    use super::*;

    #[test]
    fn test_resolution_error_code() {
        let err = TesseraError::Resolution(ResolutionError::MissingRevision {
            block_id: EntityId::new(5),
        });

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].to_string(), "Block 5 has no revision");
        assert_eq!(
            reportables[0].code().map(|code| code.to_string()).as_deref(),
            Some("tessera::resolution")
        );
        assert!(reportables[0].help().is_none());
    }

    #[test]
    fn test_missing_key_has_help() {
        let err = TesseraError::Configuration(ConfigurationError::MissingKey {
            key: "source_field",
            step: "paragraphs_layout",
        });

        let reportables = to_reportables(&err);

        assert_eq!(
            reportables[0].code().map(|code| code.to_string()).as_deref(),
            Some("tessera::configuration")
        );
        assert_eq!(
            reportables[0].help().map(|help| help.to_string()).as_deref(),
            Some("set `paragraphs.source_field` in the configuration file")
        );
    }
}
