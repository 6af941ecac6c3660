//! Error message formatting with actionable suggestions.

use std::error::Error;

use laminate_core::error::LaminateError;

use super::colors::ColorSupport;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self::with_colors(ColorSupport::detect())
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error, its suggestion and its cause chain
    pub fn format_error(&self, error: &LaminateError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());

        let mut source = error.source();
        while let Some(err) = source {
            output.push('\n');
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            source = err.source();
        }

        if let Some(suggestion) = error.suggestion() {
            output.push_str("\n\n");
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
        }

        output
    }

    /// Format a warning message
    pub fn format_warning(&self, message: &str) -> String {
        format!("{}: {}", self.colors.yellow("warning"), message)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laminate_core::types::{Format, Stage};

    fn plain() -> ErrorFormatter {
        ErrorFormatter::with_colors(ColorSupport::disabled())
    }

    #[test]
    fn test_stage_chain_and_help() {
        let err = LaminateError::FormatUndetectable {
            locator: "https://example.com/app".to_string(),
        }
        .in_stage(Stage::LoadSource, "https://example.com/app");

        let text = plain().format_error(&err);
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "error: Failed to load source 'https://example.com/app'",
                "caused by: Unable to detect configuration format of 'https://example.com/app'",
                "",
                "help: Force a format with a scheme hint such as 'file+yaml://' or 'http+json://'",
            ]
        );
    }

    #[test]
    fn test_error_without_suggestion() {
        let err = LaminateError::Decode {
            format: Format::Json,
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            plain().format_error(&err),
            "error: Failed to decode json: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_warning() {
        assert_eq!(plain().format_warning("careful"), "warning: careful");
    }
}
