//! Markup Dialect
//!
//! The element names and namespace the dialect rules are parameterised over.
//! A retail WoW dialect is embedded; `--dialect` loads another one from TOML.

pub mod schema;

pub use schema::{Dialect, DialectFile};

use std::path::Path;

use anyhow::{anyhow, Context, Result};

const EMBEDDED_DIALECT: &str = include_str!("../../resources/dialects/wow-retail.dialect.toml");

impl Dialect {
    /// Parse and validate a dialect definition from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: DialectFile = toml::from_str(content).context("invalid dialect TOML")?;
        let dialect = Dialect::from(file);
        dialect.validate().map_err(|e| anyhow!(e))?;
        Ok(dialect)
    }

    /// Load a dialect definition from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dialect file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to load dialect from {}", path.display()))
    }

    /// The embedded retail dialect
    pub fn builtin() -> Self {
        match Self::from_toml_str(EMBEDDED_DIALECT) {
            Ok(dialect) => dialect,
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded dialect: {:#}. Using minimal fallback.",
                    e
                );
                Self::minimal_fallback()
            }
        }
    }

    /// Hard-coded copy of the retail dialect in case the embedded TOML is broken
    fn minimal_fallback() -> Self {
        Self {
            name: "wow-retail".to_string(),
            version: Some("minimal-fallback".to_string()),
            description: None,
            root_element: "Ui".to_string(),
            namespace_uri: "http://www.blizzard.com/wow/ui/".to_string(),
            deprecated_element: "Backdrop".to_string(),
            deprecated_since: Some("9.0".to_string()),
            deprecated_hint: Some("Use SetBackdrop() in Lua instead.".to_string()),
            paired_element: "BackgroundInsets".to_string(),
            childful_elements: vec![
                "Frame".to_string(),
                "Button".to_string(),
                "Backdrop".to_string(),
            ],
            named_container: "Frame".to_string(),
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_dialect_parses() {
        let dialect = Dialect::from_toml_str(EMBEDDED_DIALECT).expect("embedded dialect");
        assert_eq!(dialect.name, "wow-retail");
        assert_eq!(dialect.root_element, "Ui");
        assert_eq!(dialect.namespace_uri, "http://www.blizzard.com/wow/ui/");
        assert_eq!(dialect.paired_element, "BackgroundInsets");
        assert_eq!(dialect.named_container, "Frame");
    }

    #[test]
    fn test_fallback_matches_embedded() {
        let embedded = Dialect::builtin();
        let fallback = Dialect::minimal_fallback();
        assert_eq!(embedded.root_element, fallback.root_element);
        assert_eq!(embedded.namespace_uri, fallback.namespace_uri);
        assert_eq!(embedded.deprecated_element, fallback.deprecated_element);
        assert_eq!(embedded.paired_element, fallback.paired_element);
        assert_eq!(embedded.childful_elements, fallback.childful_elements);
        assert_eq!(embedded.named_container, fallback.named_container);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("classic.dialect.toml");
        std::fs::write(
            &path,
            r#"
[dialect]
name = "classic"
root_element = "Ui"
namespace_uri = "http://www.blizzard.com/wow/ui/"

[deprecated]
element = "Backdrop"

[paired]
element = "BackgroundInsets"

[containers]
named = "Frame"
"#,
        )
        .expect("write dialect");

        let dialect = Dialect::from_file(&path).expect("load dialect");
        assert_eq!(dialect.name, "classic");
        assert!(dialect.childful_elements.is_empty());
        assert!(dialect.deprecated_hint.is_none());
    }

    #[test]
    fn test_from_file_missing() {
        let err = Dialect::from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read dialect file"));
    }

    #[test]
    fn test_invalid_element_name_rejected() {
        let content = EMBEDDED_DIALECT.replace("named = \"Frame\"", "named = \"\"");
        assert!(Dialect::from_toml_str(&content).is_err());
    }
}
