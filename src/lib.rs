extern crate pest;
#[macro_use]
extern crate pest_derive;

use std::fs;
use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use log::info;

pub mod ast;
pub mod parser;
pub mod translate;

pub use ast::{Node, Role};
pub use parser::parse_string;
pub use translate::{
    translate, Catastrophe, ErrorKind, TrailingScope, Translation, TranslateError,
    TranslatorOptions, DEFAULT_MAX_IDENTIFIER_LEN, DEFAULT_MAX_SYMBOLS_PER_SCOPE,
    DEFAULT_MAX_SYSTEMS,
};

/// Parse and translate program text, rendering any failure with its source
/// position.
pub fn translate_string(text: &str, options: &TranslatorOptions) -> Result<Translation> {
    let root = parse_string(text).map_err(|e| anyhow!("{}", e))?;
    translate(&root, options).map_err(|e| anyhow!(e.as_error_message(text)))
}

/// Translate `input` and write the result to `out`, or stdout when no output
/// file is given.
pub fn translate_file(
    input: &str,
    out: Option<&str>,
    options: &TranslatorOptions,
) -> Result<Translation> {
    let text = fs::read_to_string(input).with_context(|| format!("cannot read {}", input))?;
    let translation = translate_string(&text, options)
        .with_context(|| format!("failed to translate {}", input))?;
    match out {
        Some(path) => {
            fs::write(path, &translation.output)
                .with_context(|| format!("cannot write {}", path))?;
            info!("wrote {}", path);
        }
        None => io::stdout().write_all(translation.output.as_bytes())?,
    }
    Ok(translation)
}
