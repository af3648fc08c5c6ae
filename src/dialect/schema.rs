//! Dialect Schema Types
//!
//! File layout of a dialect definition and the flattened runtime form the rules use.

use serde::Deserialize;

/// Root dialect file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DialectFile {
    pub dialect: DialectMeta,
    pub deprecated: DeprecatedDef,
    pub paired: PairedDef,
    pub containers: ContainerDefs,
}

/// Dialect metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DialectMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub root_element: String,
    pub namespace_uri: String,
}

/// An element removed from the current dialect version
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeprecatedDef {
    pub element: String,
    pub since: Option<String>,
    pub hint: Option<String>,
}

/// A dialect-specific element whose open/close tags must pair up
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PairedDef {
    pub element: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContainerDefs {
    #[serde(default)]
    pub childful: Vec<String>,
    pub named: String,
}

/// Runtime dialect
#[derive(Debug, Clone, PartialEq)]
pub struct Dialect {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub root_element: String,
    pub namespace_uri: String,
    pub deprecated_element: String,
    pub deprecated_since: Option<String>,
    pub deprecated_hint: Option<String>,
    pub paired_element: String,
    pub childful_elements: Vec<String>,
    pub named_container: String,
}

impl From<DialectFile> for Dialect {
    fn from(file: DialectFile) -> Self {
        Self {
            name: file.dialect.name,
            version: file.dialect.version,
            description: file.dialect.description,
            root_element: file.dialect.root_element,
            namespace_uri: file.dialect.namespace_uri,
            deprecated_element: file.deprecated.element,
            deprecated_since: file.deprecated.since,
            deprecated_hint: file.deprecated.hint,
            paired_element: file.paired.element,
            childful_elements: file.containers.childful,
            named_container: file.containers.named,
        }
    }
}

impl Dialect {
    /// Check that every element name is usable inside a tag pattern
    pub fn validate(&self) -> Result<(), String> {
        let names = [
            ("root_element", &self.root_element),
            ("deprecated.element", &self.deprecated_element),
            ("paired.element", &self.paired_element),
            ("containers.named", &self.named_container),
        ]
        .into_iter()
        .chain(
            self.childful_elements
                .iter()
                .map(|name| ("containers.childful", name)),
        );

        for (field, name) in names {
            if !is_element_name(name) {
                return Err(format!("'{}' is not a valid element name for {}", name, field));
            }
        }

        if self.namespace_uri.trim().is_empty() {
            return Err("namespace_uri must not be empty".to_string());
        }

        Ok(())
    }

    /// Message for any use of the deprecated element
    pub fn deprecation_message(&self) -> String {
        let mut message = match &self.deprecated_since {
            Some(since) => format!(
                "DEPRECATED: <{}> element is not valid in modern WoW ({}+).",
                self.deprecated_element, since
            ),
            None => format!(
                "DEPRECATED: <{}> element is not valid in modern WoW.",
                self.deprecated_element
            ),
        };
        if let Some(hint) = &self.deprecated_hint {
            message.push(' ');
            message.push_str(hint);
        }
        message
    }
}

fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
