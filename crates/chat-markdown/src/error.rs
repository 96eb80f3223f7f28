//! Error types for HTML to chat markdown conversion.

use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors that can occur while converting HTML to chat markdown.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The HTML parser rejected the input.
    #[error("HTML parsing error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ConversionError::ParseError("input too long".to_string());
        assert_eq!(err.to_string(), "HTML parsing error: input too long");
    }
}
