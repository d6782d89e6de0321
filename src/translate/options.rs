/// Functions a program may call without declaring them.
pub const KNOWN_FUNCTIONS: &[&str] = &[
    "RungeKutta",
    "Euler",
    "sin",
    "cos",
    "tan",
    "exp",
    "log",
    "sqrt",
    "abs",
    "pow",
];

pub const DEFAULT_MAX_IDENTIFIER_LEN: usize = 32;
pub const DEFAULT_MAX_SYMBOLS_PER_SCOPE: usize = 256;
pub const DEFAULT_MAX_SYSTEMS: usize = 64;

/// Which scope the trailing block resolves names against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingScope {
    /// Locals of the last system processed, then globals.
    #[default]
    LastSystem,
    /// Globals only.
    Global,
}

#[derive(Debug, Clone)]
pub struct TranslatorOptions {
    pub max_identifier_len: usize,
    pub max_symbols_per_scope: usize,
    pub max_systems: usize,
    pub functions: Vec<String>,
    pub indent: String,
    pub trailing_scope: TrailingScope,
    /// Reject indexing of non-vectors and constant indices past the capacity.
    pub check_indices: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            max_identifier_len: DEFAULT_MAX_IDENTIFIER_LEN,
            max_symbols_per_scope: DEFAULT_MAX_SYMBOLS_PER_SCOPE,
            max_systems: DEFAULT_MAX_SYSTEMS,
            functions: KNOWN_FUNCTIONS.iter().map(|f| f.to_string()).collect(),
            indent: "    ".to_string(),
            trailing_scope: TrailingScope::LastSystem,
            check_indices: false,
        }
    }
}

impl TranslatorOptions {
    pub fn is_known_function(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f == name)
    }
}
