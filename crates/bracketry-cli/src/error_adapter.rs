//! Error adapter for converting BracketError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use bracketry::BracketError;

/// Adapter rendering a [`BracketError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a BracketError);

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
            BracketError::Io(_) => "bracketry::io",
            BracketError::Tree(_) => "bracketry::tree",
            BracketError::Config(_) => "bracketry::config",
            BracketError::Document(_) => "bracketry::document",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            BracketError::Tree(_) => "every input and output must name a pair of the bracket",
            BracketError::Config(_) => "layout values must be finite and non-negative",
            BracketError::Io(_) | BracketError::Document(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap a [`BracketError`] for rendering.
pub fn to_reportable(err: &BracketError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use std::io;

    use bracketry::{TreeError, identifier::Id};

    use super::*;

    fn code_of(err: &BracketError) -> Option<String> {
        to_reportable(err).code().map(|code| code.to_string())
    }

    #[test]
    fn test_codes_per_variant() {
        let io = BracketError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let tree = BracketError::Tree(TreeError::DuplicatePair(Id::new("x")));
        let config = BracketError::Config("bad".to_string());
        let document = BracketError::Document("bad".to_string());

        assert_eq!(code_of(&io).as_deref(), Some("bracketry::io"));
        assert_eq!(code_of(&tree).as_deref(), Some("bracketry::tree"));
        assert_eq!(code_of(&config).as_deref(), Some("bracketry::config"));
        assert_eq!(code_of(&document).as_deref(), Some("bracketry::document"));
    }

    #[test]
    fn test_help_only_for_actionable_errors() {
        let config = BracketError::Config("bad".to_string());
        let document = BracketError::Document("bad".to_string());

        assert!(to_reportable(&config).help().is_some());
        assert!(to_reportable(&document).help().is_none());
    }

    #[test]
    fn test_renders_message() {
        let err = BracketError::Document("expected a table".to_string());
        let mut writer = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut writer, &to_reportable(&err))
            .unwrap();

        assert!(writer.contains("expected a table"));
        assert!(writer.contains("bracketry::document"));
    }
}
