//! Dialect Rules
//!
//! The fixed battery of checks for WoW UI markup conventions that generic XML
//! syntax validation cannot express. Rules work on the raw text of a document
//! that already passed the well-formedness and root checks.
//!
//! Every rule is independent and stateless. The engine runs them in
//! [`Rule::CATALOG`] order, and each rule reports findings in text order.

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::{Finding, Location, Source};
use crate::dialect::Dialect;

/// A named dialect check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Warning: the namespace URI appears nowhere in the text.
    MissingNamespace,
    /// Error: opening and closing tags of the paired element don't balance.
    UnbalancedPairedElement,
    /// Error: the removed element is used at all. One finding per document.
    DeprecatedElement,
    /// Error: the paired element looks closed with the deprecated element's closing tag.
    MisclosedPairedElement,
    /// Warning: self-closing form of an element that normally has children.
    /// One finding per element type.
    SelfClosingContainer,
    /// Warning: container opening tag without `name`. One finding per tag.
    UnnamedFrame,
}

impl Rule {
    /// Evaluation order
    pub const CATALOG: [Rule; 6] = [
        Rule::MissingNamespace,
        Rule::UnbalancedPairedElement,
        Rule::DeprecatedElement,
        Rule::MisclosedPairedElement,
        Rule::SelfClosingContainer,
        Rule::UnnamedFrame,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::MissingNamespace => "missing-namespace",
            Rule::UnbalancedPairedElement => "unbalanced-paired-element",
            Rule::DeprecatedElement => "deprecated-element",
            Rule::MisclosedPairedElement => "misclosed-paired-element",
            Rule::SelfClosingContainer => "self-closing-container",
            Rule::UnnamedFrame => "unnamed-frame",
        }
    }
}

/// What a rule gets to look at
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub text: &'a str,
}

impl<'a> RuleContext<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

/// One unit of a tag's inside: a quoted attribute value, or any character but `>`
const TAG_BODY: &str = r#"(?:"[^"]*"|'[^']*'|[^>"'])"#;

/// Tag patterns compiled for one dialect
#[derive(Debug, Clone)]
struct Patterns {
    paired_open: Regex,
    paired_close: Regex,
    deprecated_tag: Regex,
    self_closing: Vec<(String, Regex)>,
    container_open: Regex,
    name_attribute: Regex,
}

impl Patterns {
    fn compile(dialect: &Dialect) -> Result<Self> {
        let paired = regex::escape(&dialect.paired_element);
        let deprecated = regex::escape(&dialect.deprecated_element);
        let container = regex::escape(&dialect.named_container);

        let self_closing = dialect
            .childful_elements
            .iter()
            .map(|name| {
                let pattern = format!(r"<{}\b{}*/>", regex::escape(name), TAG_BODY);
                Ok((name.clone(), compile(&pattern)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            paired_open: compile(&format!(r"<{}(?:\s{}*)?>", paired, TAG_BODY))?,
            paired_close: compile(&format!(r"</{}\s*>", paired))?,
            deprecated_tag: compile(&format!(r"</?{}[\s/>]", deprecated))?,
            self_closing,
            container_open: compile(&format!(r"<{}\b{}*>", container, TAG_BODY))?,
            name_attribute: compile(r"\sname\s*=")?,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("invalid rule pattern '{}'", pattern))
}

/// Runs the rule catalog against documents of one dialect
#[derive(Debug, Clone)]
pub struct RuleEngine {
    dialect: Dialect,
    patterns: Patterns,
}

impl RuleEngine {
    pub fn new(dialect: Dialect) -> Result<Self> {
        let patterns = Patterns::compile(&dialect)
            .with_context(|| format!("cannot build rules for dialect '{}'", dialect.name))?;
        Ok(Self { dialect, patterns })
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Run every rule in catalog order. Errors never stop later rules.
    pub fn run(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in Rule::CATALOG {
            let rule_findings = self.check(rule, ctx);
            if !rule_findings.is_empty() {
                log::debug!(
                    "Rule {} found {} finding(s)",
                    rule.name(),
                    rule_findings.len()
                );
            }
            findings.extend(rule_findings);
        }
        findings
    }

    /// Run a single rule
    pub fn check(&self, rule: Rule, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let text = ctx.text;
        match rule {
            Rule::MissingNamespace => self.check_namespace(text),
            Rule::UnbalancedPairedElement => self.check_paired_balance(text),
            Rule::DeprecatedElement => self.check_deprecated(text),
            Rule::MisclosedPairedElement => self.check_misclosed(text),
            Rule::SelfClosingContainer => self.check_self_closing(text),
            Rule::UnnamedFrame => self.check_unnamed(text),
        }
    }

    fn check_namespace(&self, text: &str) -> Vec<Finding> {
        let uri = &self.dialect.namespace_uri;
        if text.contains(uri.as_str()) {
            return Vec::new();
        }
        vec![Finding::warning(
            Source::Rule(Rule::MissingNamespace),
            format!(
                "Missing xmlns declaration - should include xmlns=\"{}\"",
                uri
            ),
        )]
    }

    fn check_paired_balance(&self, text: &str) -> Vec<Finding> {
        let opening = self
            .patterns
            .paired_open
            .find_iter(text)
            .filter(|m| !m.as_str().ends_with("/>"))
            .count();
        let closing = self.patterns.paired_close.find_iter(text).count();

        if opening == closing {
            return Vec::new();
        }
        vec![Finding::error(
            Source::Rule(Rule::UnbalancedPairedElement),
            format!(
                "Mismatched <{}> tags ({} opening, {} closing)",
                self.dialect.paired_element, opening, closing
            ),
        )]
    }

    fn check_deprecated(&self, text: &str) -> Vec<Finding> {
        match self.patterns.deprecated_tag.find(text) {
            Some(m) => vec![
                Finding::error(
                    Source::Rule(Rule::DeprecatedElement),
                    self.dialect.deprecation_message(),
                )
                .at(Location::from_offset(text, m.start())),
            ],
            None => Vec::new(),
        }
    }

    /// Heuristic for one historical typo: `<BackgroundInsets>` closed by
    /// `</Backdrop>` instead of `</BackgroundInsets>`.
    ///
    /// Fires when the first `<BackgroundInsets>` precedes the first
    /// `</Backdrop>` and no `</BackgroundInsets>` follows that opening before
    /// the `</Backdrop>`. Only the exact tag forms are considered, so
    /// attribute-bearing openings are ignored. It can misfire on a
    /// legitimate legacy `<Backdrop>` whose insets are closed after the
    /// backdrop. The mirror case (`</BackgroundInsets>` closing a
    /// `<Backdrop>`) is not detected.
    fn check_misclosed(&self, text: &str) -> Vec<Finding> {
        let deprecated_close = format!("</{}>", self.dialect.deprecated_element);
        let paired_open = format!("<{}>", self.dialect.paired_element);
        let paired_close = format!("</{}>", self.dialect.paired_element);

        let (Some(close_pos), Some(open_pos)) =
            (text.find(&deprecated_close), text.find(&paired_open))
        else {
            return Vec::new();
        };
        if open_pos >= close_pos {
            return Vec::new();
        }

        let next_paired_close = text[open_pos..]
            .find(&paired_close)
            .map(|i| i + open_pos);
        let misclosed = match next_paired_close {
            Some(pos) => close_pos < pos,
            None => true,
        };
        if !misclosed {
            return Vec::new();
        }

        vec![
            Finding::error(
                Source::Rule(Rule::MisclosedPairedElement),
                format!(
                    "Possible incorrect closing tag: {} should be {}",
                    deprecated_close, paired_close
                ),
            )
            .at(Location::from_offset(text, close_pos)),
        ]
    }

    fn check_self_closing(&self, text: &str) -> Vec<Finding> {
        self.patterns
            .self_closing
            .iter()
            .filter_map(|(name, pattern)| {
                let m = pattern.find(text)?;
                Some(
                    Finding::warning(
                        Source::Rule(Rule::SelfClosingContainer),
                        format!(
                            "Self-closing <{}/> tag found - may need child elements",
                            name
                        ),
                    )
                    .at(Location::from_offset(text, m.start())),
                )
            })
            .collect()
    }

    /// Quoted attribute values may contain `>`; the `name` check still sees
    /// the whole opening tag.
    fn check_unnamed(&self, text: &str) -> Vec<Finding> {
        self.patterns
            .container_open
            .find_iter(text)
            .filter(|m| !self.patterns.name_attribute.is_match(m.as_str()))
            .map(|m| {
                Finding::warning(
                    Source::Rule(Rule::UnnamedFrame),
                    format!(
                        "{} without name attribute - may cause issues accessing from Lua",
                        self.dialect.named_container
                    ),
                )
                .at(Location::from_offset(text, m.start()))
            })
            .collect()
    }
}
