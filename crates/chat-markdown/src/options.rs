//! Configuration options for chat markdown conversion.

/// Options controlling how HTML is read before formatting.
///
/// The defaults mirror a lenient HTML parser: tag names keep the case they were
/// written in, and character references in text are decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ConversionOptions {
    /// Decode HTML character references in text nodes.
    ///
    /// Numeric references (`&#39;`, `&#x27;`) and the HTML 4 named set plus
    /// `&apos;` are decoded; other HTML5-only names such as `&NotEqualTilde;`
    /// are left as written.
    pub decode_entities: bool,
    /// Lowercase tag names before looking up their formatting rule.
    ///
    /// Off by default, so `<STRONG>` is treated as an unknown tag and passes its
    /// text through unformatted.
    pub lowercase_tags: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            decode_entities: true,
            lowercase_tags: false,
        }
    }
}

impl ConversionOptions {
    /// Create options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether character references are decoded.
    #[must_use]
    pub const fn with_decode_entities(mut self, decode: bool) -> Self {
        self.decode_entities = decode;
        self
    }

    /// Set whether tag names are lowercased before rule lookup.
    #[must_use]
    pub const fn with_lowercase_tags(mut self, lowercase: bool) -> Self {
        self.lowercase_tags = lowercase;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConversionOptions::default();
        assert!(options.decode_entities);
        assert!(!options.lowercase_tags);
        assert_eq!(options, ConversionOptions::new());
    }

    #[test]
    fn test_builder() {
        let options = ConversionOptions::new()
            .with_decode_entities(false)
            .with_lowercase_tags(true);
        assert!(!options.decode_entities);
        assert!(options.lowercase_tags);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial() {
        let options: ConversionOptions = serde_json::from_str(r#"{"lowercaseTags":true}"#).unwrap();
        assert!(options.lowercase_tags);
        assert!(options.decode_entities);
    }
}
