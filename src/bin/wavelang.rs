use anyhow::Result;
use clap::{Parser, ValueEnum};
use wavelang::{
    translate_file, TrailingScope, TranslatorOptions, DEFAULT_MAX_IDENTIFIER_LEN,
    DEFAULT_MAX_SYMBOLS_PER_SCOPE, DEFAULT_MAX_SYSTEMS,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TrailingScopeArg {
    /// Locals of the last system, then globals
    LastSystem,
    /// Globals only
    Global,
}

/// translates a catastrophe program (.wl) into imperative statements
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input filename
    input: String,

    /// Output filename (stdout if omitted)
    #[arg(short, long)]
    out: Option<String>,

    /// Print the declared scopes to stderr after translating
    #[arg(short, long)]
    summary: bool,

    /// Reject indexing of non-vectors and constant indices past a vector's capacity
    #[arg(long)]
    check_indices: bool,

    /// Scope used to resolve names in the trailing block
    #[arg(long, value_enum, default_value_t = TrailingScopeArg::LastSystem)]
    trailing_scope: TrailingScopeArg,

    /// Maximum identifier length
    #[arg(long, default_value_t = DEFAULT_MAX_IDENTIFIER_LEN)]
    max_identifier_len: usize,

    /// Maximum number of symbols in one scope
    #[arg(long, default_value_t = DEFAULT_MAX_SYMBOLS_PER_SCOPE)]
    max_symbols: usize,

    /// Maximum number of systems
    #[arg(long, default_value_t = DEFAULT_MAX_SYSTEMS)]
    max_systems: usize,

    /// Additional function names to accept (repeatable)
    #[arg(short, long = "function")]
    functions: Vec<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Args::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut options = TranslatorOptions {
        max_identifier_len: cli.max_identifier_len,
        max_symbols_per_scope: cli.max_symbols,
        max_systems: cli.max_systems,
        check_indices: cli.check_indices,
        trailing_scope: match cli.trailing_scope {
            TrailingScopeArg::LastSystem => TrailingScope::LastSystem,
            TrailingScopeArg::Global => TrailingScope::Global,
        },
        ..Default::default()
    };
    options.functions.extend(cli.functions);

    let translation = translate_file(&cli.input, cli.out.as_deref(), &options)?;
    if cli.summary {
        eprint!("{}", translation.catastrophe);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_flags_default_to_the_library_defaults() {
        let args = Args::parse_from(["wavelang", "model.wl"]);
        let defaults = TranslatorOptions::default();
        assert_eq!(args.max_identifier_len, defaults.max_identifier_len);
        assert_eq!(args.max_symbols, defaults.max_symbols_per_scope);
        assert_eq!(args.max_systems, defaults.max_systems);
    }
}
