use log::info;

use crate::ast::Node;

pub mod emit;
pub mod error;
pub mod model;
pub mod options;
pub mod scope;
pub mod state;
pub mod walker;

pub use emit::Emitter;
pub use error::{ErrorKind, Limit, Result, TranslateError};
pub use model::{Catastrophe, System};
pub use options::{
    TrailingScope, TranslatorOptions, DEFAULT_MAX_IDENTIFIER_LEN, DEFAULT_MAX_SYMBOLS_PER_SCOPE,
    DEFAULT_MAX_SYSTEMS, KNOWN_FUNCTIONS,
};
pub use scope::{resolve, Symbol, SymbolKind, SymbolTable};
pub use state::{TopState, TranslationContext};
pub use walker::Walker;

/// The result of a successful run: the populated program model and the
/// emitted text.
#[derive(Debug, Clone)]
pub struct Translation {
    pub catastrophe: Catastrophe,
    pub output: String,
}

/// Translate a whole program tree with a fresh context.
pub fn translate(root: &Node, options: &TranslatorOptions) -> Result<Translation> {
    let translation = TranslationContext::new(options).run(root)?;
    info!(
        "translated catastrophe {} ({} systems, {} bytes)",
        translation.catastrophe.name(),
        translation.catastrophe.systems().len(),
        translation.output.len()
    );
    Ok(translation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_string;

    const A3: &str = "
        CATASTROPHE A3
        PARAMETERS l1, l2, l3;
        VARIABLES gamma1, gamma2;
        VECTORS Y[6];
        SYSTEM A3 (6)
        VARIABLES a, b, x, d;
        BEGIN
        a <- a + b * (1 + 3) + RungeKutta(x + 4) + 3.2;
        a <- a + 3;
        a <- 4;
        END
        BEGIN
        END
    ";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn a3_scopes_are_populated() {
        init();
        let root = parse_string(A3).unwrap();
        let translation = translate(&root, &TranslatorOptions::default()).unwrap();
        let cat = &translation.catastrophe;
        assert_eq!(cat.name(), "A3");
        assert_eq!(cat.globals().count_of(SymbolKind::Parameter), 3);
        assert_eq!(cat.globals().count_of(SymbolKind::Variable), 2);
        assert_eq!(cat.globals().count_of(SymbolKind::Vector), 1);
        assert_eq!(cat.globals().get("Y").unwrap().capacity(), Some(6));
        assert_eq!(cat.systems().len(), 1);
        let system = &cat.systems()[0];
        assert_eq!(system.name(), "A3");
        assert_eq!(system.declared_equation_count(), 6);
        assert_eq!(system.scope().count_of(SymbolKind::Variable), 4);
    }

    #[test]
    fn a3_output() {
        init();
        let root = parse_string(A3).unwrap();
        let translation = translate(&root, &TranslatorOptions::default()).unwrap();
        assert_eq!(
            translation.output,
            "{\n    a = a + b * (1 + 3) + RungeKutta(x + 4) + 3.2;\n    a = a + 3;\n    a = 4;\n}\n{\n}\n"
        );
    }

    #[test]
    fn independent_runs_share_nothing() {
        let options = TranslatorOptions::default();
        let root = parse_string(A3).unwrap();
        let first = translate(&root, &options).unwrap();
        let second = translate(&root, &options).unwrap();
        assert_eq!(first.output, second.output);
        assert_eq!(second.catastrophe.systems().len(), 1);
    }

    #[test]
    fn trailing_block_scope_policy() {
        let text = "
            CATASTROPHE T
            VARIABLES g;
            SYSTEM S (1)
            VARIABLES a;
            BEGIN a <- g; END
            BEGIN a <- 1; END
        ";
        let root = parse_string(text).unwrap();
        let output = translate(&root, &TranslatorOptions::default()).unwrap().output;
        assert!(output.ends_with("{\n    a = 1;\n}\n"));

        let options = TranslatorOptions {
            trailing_scope: TrailingScope::Global,
            ..Default::default()
        };
        let err = translate(&root, &options).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownSymbol { name } if name == "a"));
    }

    macro_rules! count {
        () => (0usize);
        ( $x:tt $($xs:tt)* ) => (1usize + count!($($xs)*));
    }

    macro_rules! translation_tests {
        ($($name:ident: $text:literal [$($error:literal,)*],)*) => {
        $(
            #[test]
            fn $name() {
                let text = $text;
                let root = parse_string(text).unwrap();
                match translate(&root, &TranslatorOptions::default()) {
                    Ok(translation) => {
                        if count!($($error)*) != 0 {
                            panic!("Should have failed: {}", translation.output)
                        }
                    }
                    Err(e) => {
                        if count!($($error)*) == 0 {
                            panic!("Should have succeeded: {}", e.as_error_message(text))
                        } else {
                            let message = e.as_error_message(text);
                            $(
                                if !message.contains($error) {
                                    panic!("Expected error '{}' not found in '{}'", $error, message);
                                }
                            )*
                        }
                    }
                };
            }
        )*
        }
    }

    translation_tests!(
        undeclared_array_target: "
            CATASTROPHE A3
            PARAMETERS l1, l2, l3;
            VECTORS Y[6];
            SYSTEM A3 (6)
            VARIABLES a, b, x, d;
            BEGIN
            a <- 4;
            yarr[4] <- l1 * (x + 1);
            END
            BEGIN
            END
        " ["cannot find variable yarr", "Line 9",],
        global_vector_target: "
            CATASTROPHE A3
            PARAMETERS l1;
            VECTORS Y[6];
            SYSTEM A3 (1)
            VARIABLES x;
            BEGIN
            Y[4] <- l1 * (x + 1);
            END
            BEGIN
            END
        " [],
        unknown_function: "
            CATASTROPHE M
            VARIABLES x;
            SYSTEM S (1)
            BEGIN
            x <- Mystery(x);
            END
            BEGIN
            END
        " ["unknown function Mystery",],
        several_systems: "
            CATASTROPHE M
            VARIABLES x;
            SYSTEM S (1)
            VARIABLES a;
            BEGIN a <- x; END
            SYSTEM R (1)
            VARIABLES b;
            BEGIN b <- x * 2; END
            BEGIN b <- 0; END
        " [],
        system_locals_are_private: "
            CATASTROPHE M
            VARIABLES x;
            SYSTEM S (1)
            VARIABLES a;
            BEGIN a <- x; END
            SYSTEM R (1)
            VARIABLES b;
            BEGIN b <- a; END
            BEGIN END
        " ["cannot find variable a",],
        duplicate_local: "
            CATASTROPHE M
            VARIABLES x;
            SYSTEM S (1)
            VARIABLES a, a;
            BEGIN END
            BEGIN END
        " ["'a' is already declared in system S",],
        no_declarations: "
            CATASTROPHE M
            SYSTEM S (1)
            BEGIN END
            BEGIN END
        " ["unexpected node while in state AwaitingDeclarationOrSystem",],
        no_system: "
            CATASTROPHE M
            VARIABLES x;
            BEGIN x <- 1; END
        " ["program ended in state DeclarationList", "Line 4",],
        declarations_after_a_system: "
            CATASTROPHE M
            VARIABLES x;
            SYSTEM S (1)
            BEGIN x <- 1; END
            VARIABLES y;
            BEGIN y <- x; END
        " [],
        missing_trailing_block: "
            CATASTROPHE M
            VARIABLES x;
            SYSTEM S (1)
            BEGIN x <- 1; END
        " ["program ended in state System",],
        duplicate_global: "
            CATASTROPHE M
            PARAMETERS k;
            VARIABLES k;
            SYSTEM S (1)
            BEGIN END
            BEGIN END
        " ["'k' is already declared in catastrophe M",],
        long_name: "
            CATASTROPHE M
            VARIABLES abcdefghijklmnopqrstuvwxyzabcdefghij;
            SYSTEM S (1)
            BEGIN END
            BEGIN END
        " ["longer than 32 characters",],
    );
}
