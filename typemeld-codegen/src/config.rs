//! Generator configuration.

/// Options shared by every target renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Indentation used for declaration bodies.
    pub indent: String,
    /// Emit the target's visibility keyword (`export`, `public`, `pub`).
    pub public: bool,
    /// Derives put on generated Rust structs.
    pub rust_derives: Vec<String>,
    /// Banner emitted first as line comments.
    pub header: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            public: false,
            rust_derives: Vec::new(),
            header: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the body indentation.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Enables or disables visibility keywords.
    #[must_use]
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Sets the derive list for Rust structs.
    #[must_use]
    pub fn with_rust_derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rust_derives = derives.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the banner comment.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Returns `keyword` followed by a space when visibility is enabled.
    pub(crate) fn visibility(&self, keyword: &str) -> String {
        if self.public {
            format!("{keyword} ")
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.indent, "  ");
        assert!(!config.public);
        assert!(config.rust_derives.is_empty());
        assert!(config.header.is_none());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_indent("\t")
            .with_public(true)
            .with_rust_derives(["Debug", "Clone"])
            .with_header("generated");
        assert_eq!(config.indent, "\t");
        assert!(config.public);
        assert_eq!(config.rust_derives, ["Debug", "Clone"]);
        assert_eq!(config.header.as_deref(), Some("generated"));
    }

    #[test]
    fn test_visibility() {
        assert_eq!(GeneratorConfig::new().visibility("pub"), "");
        assert_eq!(
            GeneratorConfig::new().with_public(true).visibility("pub"),
            "pub "
        );
    }
}
