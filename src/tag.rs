//! Placeholder tags: finding `[[...]]` occurrences in a template and
//! splitting their inner expression into a rendering mode and a path.

use regex::Regex;
use std::sync::LazyLock;

/// `[[`, one or more characters that are not brackets, `]]`.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]+)\]\]").expect("tag pattern is valid"));

/// Sigil selecting raw JSON rendering.
pub const RAW_SIGIL: &str = "raw";

/// One tag occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Exact matched text including the brackets; used as the replacement key.
    pub raw: String,
    /// Text between the brackets.
    pub expression: String,
}

/// How a resolved value is written into the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Scalar text: strings unquoted, numbers and booleans as written.
    #[default]
    Value,
    /// The JSON serialization of the node.
    Raw,
}

/// A tag expression split into mode and path. The path prefix is applied
/// later, by the filler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagExpression {
    pub mode: Mode,
    pub path: String,
}

/// Returns every tag in `template`, left to right, one entry per occurrence.
pub fn scan(template: &str) -> Vec<Tag> {
    TAG_PATTERN
        .captures_iter(template)
        .map(|caps| Tag {
            raw: caps[0].to_string(),
            expression: caps[1].to_string(),
        })
        .collect()
}

impl Tag {
    pub fn parse(&self) -> TagExpression {
        TagExpression::parse(&self.expression)
    }
}

impl TagExpression {
    /// Splits on the first `:`. Only `raw` selects a different mode, but any
    /// other prefix before the colon is stripped as well.
    pub fn parse(expression: &str) -> Self {
        match expression.split_once(':') {
            Some((sigil, path)) => Self {
                mode: if sigil == RAW_SIGIL { Mode::Raw } else { Mode::Value },
                path: path.to_string(),
            },
            None => Self {
                mode: Mode::Value,
                path: expression.to_string(),
            },
        }
    }
}
