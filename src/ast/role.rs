/// The three kinds of declaration list a catastrophe or system may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Parameters,
    Variables,
    Vectors,
}

/// Grammatical role of a node, derived once from its raw tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Expression,
    Product,
    Value,
    Array,
    Function,
    Variable,
    Literal,
    Leftside,
    Assignment,
    Block,
    DeclarationList(DeclKind),
    System,
    /// Punctuation, operators, keywords and structural markers.
    Token,
    Unknown,
}

impl Role {
    /// Classify a raw tag by its most specific rule name.
    ///
    /// Segments are scanned from the end; the `>` and `regex` markers only
    /// say whether the node is compound or terminal and are skipped. A tag
    /// made of markers alone (`"regex"`, `"char"`, `"string"`) is a token.
    pub fn classify(tag: &str) -> Role {
        let rule = tag
            .rsplit('|')
            .find(|segment| !matches!(*segment, ">" | "regex" | ""));
        match rule {
            None if tag.is_empty() => Role::Unknown,
            None => Role::Token,
            Some("char" | "string") => Role::Token,
            Some("integer" | "float") => Role::Literal,
            Some("variable") => Role::Variable,
            Some("array") => Role::Array,
            Some("function") => Role::Function,
            Some("value") => Role::Value,
            Some("product") => Role::Product,
            Some("expression" | "maths") => Role::Expression,
            Some("leftside") => Role::Leftside,
            Some("assignment") => Role::Assignment,
            Some("block") => Role::Block,
            Some("parlist") => Role::DeclarationList(DeclKind::Parameters),
            Some("varlist") => Role::DeclarationList(DeclKind::Variables),
            Some("veclist") => Role::DeclarationList(DeclKind::Vectors),
            Some("system") => Role::System,
            Some(_) => Role::Unknown,
        }
    }
}
