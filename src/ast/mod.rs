use std::fmt;

pub mod role;

pub use role::{DeclKind, Role};

/// Byte range of a node in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSpan {
    pub pos_start: usize,
    pub pos_end: usize,
}

/// A node of the tagged tree handed over by a front end.
///
/// The tag is the `|`-separated list of grammar rules the node passed
/// through, most specific last, ending in `>` for compound nodes or `regex`
/// for terminal tokens (e.g. `"expression|>"`, `"value|variable|regex"`).
/// Punctuation is tagged `char` and keywords `string`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: String,
    pub content: String,
    pub children: Vec<Node>,
    pub span: Option<StringSpan>,
}

impl Node {
    pub fn leaf(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            content: content.into(),
            children: Vec::new(),
            span: None,
        }
    }

    pub fn branch(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            content: String::new(),
            children,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Option<StringSpan>) -> Self {
        self.span = span;
        self
    }

    /// Non-empty literal content and no children.
    pub fn is_terminal(&self) -> bool {
        !self.content.is_empty() && self.children.is_empty()
    }

    pub fn role(&self) -> Role {
        Role::classify(&self.tag)
    }

    /// Prepend a rule name to the tag, the way a single-child rule is folded
    /// into its only child.
    pub fn wrap_tag(mut self, rule: &str) -> Self {
        self.tag = format!("{}|{}", rule, self.tag);
        self
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_terminal() {
            write!(f, "{} '{}'", self.tag, self.content)
        } else {
            write!(f, "{} ({} children)", self.tag, self.children.len())
        }
    }
}
