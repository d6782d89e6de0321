use pest::error::Error;

use crate::ast::Node;

pub mod wl_parser;
pub use wl_parser::Rule as WlRule;
pub use wl_parser::WlParser;

/// Parse program text into the tagged tree consumed by the translator.
pub fn parse_string(text: &str) -> Result<Node, Box<Error<WlRule>>> {
    wl_parser::parse_string(text)
}

#[cfg(test)]
mod tests {
    use pest::Parser;

    use super::{WlParser, WlRule};

    const WL_FILES: &[(&str, &str)] = &[
        ("a3.wl", include_str!("a3.wl")),
        ("oscillator.wl", include_str!("oscillator.wl")),
    ];

    #[test]
    fn parse_examples() {
        for (filename, contents) in WL_FILES {
            let _list = WlParser::parse(WlRule::program, contents)
                .unwrap_or_else(|e| panic!("unsuccessful parse ({filename}) {e}"));
        }
    }
}
