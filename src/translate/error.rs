use std::fmt;

use pest::Span;
use thiserror::Error;

use crate::ast::{Node, StringSpan};

use super::state::TopState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    SymbolsPerScope,
    Systems,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Limit::SymbolsPerScope => write!(f, "symbols per scope"),
            Limit::Systems => write!(f, "systems per catastrophe"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("name '{name}' is longer than {limit} characters")]
    NameTooLong { name: String, limit: usize },

    #[error("'{name}' is already declared in {scope}")]
    DuplicateSymbol { name: String, scope: String },

    #[error("cannot find variable {name}")]
    UnknownSymbol { name: String },

    #[error("unknown function {name}")]
    UnknownFunction { name: String },

    #[error("too many {what} (limit is {limit})")]
    CapacityExceeded { what: Limit, limit: usize },

    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },

    #[error("unexpected node while in state {state:?}")]
    UnexpectedNode { state: TopState },

    #[error("no rule for node inside {context}")]
    NoRuleForNode { context: &'static str },

    #[error("program ended in state {state:?}")]
    IncompleteProgram { state: TopState },

    #[error("{name} is not a vector and cannot be indexed")]
    NotAVector { name: String },

    #[error("index {index} is out of range for {name}[{capacity}]")]
    IndexOutOfRange {
        name: String,
        index: usize,
        capacity: usize,
    },
}

/// A translation failure, located at the node that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateError {
    kind: ErrorKind,
    tag: String,
    source_ref: Option<StringSpan>,
}

impl TranslateError {
    pub fn new(kind: ErrorKind, tag: impl Into<String>, span: Option<StringSpan>) -> Self {
        Self {
            kind,
            tag: tag.into(),
            source_ref: span,
        }
    }

    pub fn at(node: &Node, kind: ErrorKind) -> Self {
        Self::new(kind, node.tag.as_str(), node.span)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn span(&self) -> Option<StringSpan> {
        self.source_ref
    }

    pub fn as_error_message(&self, input: &str) -> String {
        let position = self
            .source_ref
            .and_then(|source_ref| Span::new(input, source_ref.pos_start, source_ref.pos_end))
            .map(|span| span.start_pos().line_col());
        match position {
            Some((line, col)) => format!("Line {}, Column {}: Error: {}", line, col, self),
            None => format!("Error: {}", self),
        }
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (node '{}')", self.kind, self.tag)
    }
}

impl std::error::Error for TranslateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;
