//! Element Tree
//!
//! A small owned tree of elements built from a parsed document.
//! Attributes stay separate from child elements; text and comments are dropped.

/// A single attribute on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element with its attributes and element children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiElement {
    /// Local name, without namespace
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<UiElement>,
}

impl UiElement {
    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes = node
            .attributes()
            .map(|attr| Attribute {
                name: attr.name().to_string(),
                value: attr.value().to_string(),
            })
            .collect();

        let children = node
            .children()
            .filter(|child| child.is_element())
            .map(UiElement::from_node)
            .collect();

        Self {
            name: node.tag_name().name().to_string(),
            attributes,
            children,
        }
    }

    /// Value of an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Number of elements in this subtree, including self
    pub fn element_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(UiElement::element_count)
            .sum::<usize>()
    }
}

/// Parse text into an element tree rooted at the document element
pub fn parse_tree(text: &str) -> Result<UiElement, String> {
    let doc = roxmltree::Document::parse_with_options(text, super::parsing_options())
        .map_err(|e| e.to_string())?;
    Ok(UiElement::from_node(doc.root_element()))
}
