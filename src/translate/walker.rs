use log::trace;

use crate::ast::{Node, Role};

use super::emit::{join_fragments, Emitter};
use super::error::{ErrorKind, Result, TranslateError};
use super::options::TranslatorOptions;
use super::scope::{resolve, Symbol, SymbolKind, SymbolTable};

/// The grammatical position a child is being translated in. Each one owns a
/// rule table saying which child roles it admits and what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Operand,
    Expression,
    Product,
    Value,
    Index,
    Arguments,
    Leftside,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Verbatim,
    Skip,
    Literal,
    Variable,
    Array,
    Function,
    Assignment,
    Compound(Construct),
}

struct DispatchRule {
    role: Role,
    /// Exact content the node must carry, for punctuation.
    text: Option<&'static str>,
    action: Action,
}

impl DispatchRule {
    fn matches(&self, node: &Node, role: Role) -> bool {
        self.role == role && self.text.map_or(true, |text| text == node.content)
    }
}

const fn rule(role: Role, action: Action) -> DispatchRule {
    DispatchRule {
        role,
        text: None,
        action,
    }
}

const fn token(text: &'static str, action: Action) -> DispatchRule {
    DispatchRule {
        role: Role::Token,
        text: Some(text),
        action,
    }
}

const OPERAND_RULES: &[DispatchRule] = &[
    rule(Role::Expression, Action::Compound(Construct::Expression)),
    rule(Role::Product, Action::Compound(Construct::Product)),
    rule(Role::Value, Action::Compound(Construct::Value)),
    rule(Role::Function, Action::Function),
    rule(Role::Array, Action::Array),
    rule(Role::Variable, Action::Variable),
    rule(Role::Literal, Action::Literal),
];

// operands plus the operators and brackets between them
const TERM_RULES: &[DispatchRule] = &[
    rule(Role::Token, Action::Verbatim),
    rule(Role::Expression, Action::Compound(Construct::Expression)),
    rule(Role::Product, Action::Compound(Construct::Product)),
    rule(Role::Value, Action::Compound(Construct::Value)),
    rule(Role::Function, Action::Function),
    rule(Role::Array, Action::Array),
    rule(Role::Variable, Action::Variable),
    rule(Role::Literal, Action::Literal),
];

// commas between operands; the parentheses are checked by `function`
const ARGUMENT_RULES: &[DispatchRule] = &[
    token(",", Action::Verbatim),
    rule(Role::Expression, Action::Compound(Construct::Expression)),
    rule(Role::Product, Action::Compound(Construct::Product)),
    rule(Role::Value, Action::Compound(Construct::Value)),
    rule(Role::Function, Action::Function),
    rule(Role::Array, Action::Array),
    rule(Role::Variable, Action::Variable),
    rule(Role::Literal, Action::Literal),
];

const LEFTSIDE_RULES: &[DispatchRule] = &[
    rule(Role::Variable, Action::Variable),
    rule(Role::Array, Action::Array),
];

// BEGIN, END and the `;` terminators carry no payload
const BLOCK_RULES: &[DispatchRule] = &[
    rule(Role::Assignment, Action::Assignment),
    rule(Role::Token, Action::Skip),
];

impl Construct {
    fn rules(self) -> &'static [DispatchRule] {
        match self {
            // the brackets are checked by `array`
            Construct::Operand | Construct::Index => OPERAND_RULES,
            Construct::Expression | Construct::Product | Construct::Value => TERM_RULES,
            Construct::Arguments => ARGUMENT_RULES,
            Construct::Leftside => LEFTSIDE_RULES,
            Construct::Block => BLOCK_RULES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Construct::Operand => "operand",
            Construct::Expression => "expression",
            Construct::Product => "product",
            Construct::Value => "value",
            Construct::Index => "array index",
            Construct::Arguments => "function arguments",
            Construct::Leftside => "assignment target",
            Construct::Block => "block",
        }
    }
}

/// Translates blocks, assignments and expressions against a fixed pair of
/// scopes. Only reads the symbol tables.
pub struct Walker<'a> {
    local: Option<&'a SymbolTable>,
    global: &'a SymbolTable,
    options: &'a TranslatorOptions,
}

impl<'a> Walker<'a> {
    pub fn new(
        local: Option<&'a SymbolTable>,
        global: &'a SymbolTable,
        options: &'a TranslatorOptions,
    ) -> Self {
        Self {
            local,
            global,
            options,
        }
    }

    /// Emit a block as a brace pair with one statement per line.
    ///
    /// Each statement is fully translated before it is written, so a failing
    /// assignment leaves no partial line behind.
    pub fn block(&self, node: &Node, emitter: &mut Emitter) -> Result<()> {
        if node.role() != Role::Block {
            return Err(no_rule(node, Construct::Block));
        }
        emitter.open_block();
        for child in &node.children {
            match self.dispatch(Construct::Block, child)? {
                Action::Assignment => {
                    let statement = self.assignment(child)?;
                    emitter.statement(&statement);
                }
                _ => trace!("skipping block token '{}'", child.content),
            }
        }
        emitter.close_block();
        Ok(())
    }

    /// Translate `target <- expression` into `target = expression;`.
    pub fn assignment(&self, node: &Node) -> Result<String> {
        let [target, arrow, rhs] = node.children.as_slice() else {
            return Err(TranslateError::at(
                node,
                ErrorKind::NoRuleForNode {
                    context: "assignment",
                },
            ));
        };
        let action = self.dispatch(Construct::Leftside, target)?;
        let target = self.apply(action, target)?;
        if arrow.role() != Role::Token || arrow.content != "<-" {
            return Err(TranslateError::at(
                arrow,
                ErrorKind::NoRuleForNode {
                    context: "assignment",
                },
            ));
        }
        let rhs = self.operand(rhs)?;
        Ok(format!("{} = {};", target, rhs))
    }

    /// Translate a node standing in operand position (right-hand side,
    /// index, or argument).
    pub fn operand(&self, node: &Node) -> Result<String> {
        let action = self.dispatch(Construct::Operand, node)?;
        self.apply(action, node)
    }

    fn dispatch(&self, construct: Construct, node: &Node) -> Result<Action> {
        let role = node.role();
        let action = construct
            .rules()
            .iter()
            .find(|rule| rule.matches(node, role))
            .map(|rule| rule.action)
            .ok_or_else(|| no_rule(node, construct))?;
        trace!("{}: {} -> {:?}", construct.name(), node, action);
        Ok(action)
    }

    fn apply(&self, action: Action, node: &Node) -> Result<String> {
        match action {
            Action::Verbatim | Action::Literal => Ok(node.content.clone()),
            Action::Skip => Ok(String::new()),
            Action::Variable => self.variable(node),
            Action::Array => self.array(node),
            Action::Function => self.function(node),
            Action::Assignment => self.assignment(node),
            Action::Compound(construct) => self.compound(construct, node),
        }
    }

    fn compound(&self, construct: Construct, node: &Node) -> Result<String> {
        if node.is_terminal() {
            return Ok(node.content.clone());
        }
        let fragments = node
            .children
            .iter()
            .map(|child| {
                let action = self.dispatch(construct, child)?;
                self.apply(action, child)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(join_fragments(&fragments))
    }

    fn variable(&self, node: &Node) -> Result<String> {
        let name = name_of(node)?;
        self.lookup(node, name)?;
        Ok(name.to_string())
    }

    fn array(&self, node: &Node) -> Result<String> {
        let [head, open, index, close] = node.children.as_slice() else {
            return Err(no_rule(node, Construct::Index));
        };
        if head.role() != Role::Variable {
            return Err(no_rule(head, Construct::Index));
        }
        expect_token(open, "[", Construct::Index)?;
        expect_token(close, "]", Construct::Index)?;
        let name = name_of(head)?;
        let symbol = self.lookup(head, name)?;
        if self.options.check_indices {
            check_index(node, symbol, index)?;
        }
        let action = self.dispatch(Construct::Index, index)?;
        let index = self.apply(action, index)?;
        Ok(format!("{}[{}]", name, index))
    }

    fn function(&self, node: &Node) -> Result<String> {
        let [head, open, arguments @ .., close] = node.children.as_slice() else {
            return Err(no_rule(node, Construct::Arguments));
        };
        if head.role() != Role::Variable {
            return Err(no_rule(head, Construct::Arguments));
        }
        expect_token(open, "(", Construct::Arguments)?;
        expect_token(close, ")", Construct::Arguments)?;
        let name = name_of(head)?;
        if !self.options.is_known_function(name) {
            return Err(TranslateError::at(
                head,
                ErrorKind::UnknownFunction {
                    name: name.to_string(),
                },
            ));
        }
        let arguments = arguments
            .iter()
            .map(|child| {
                let action = self.dispatch(Construct::Arguments, child)?;
                self.apply(action, child)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("{}({})", name, join_fragments(&arguments)))
    }

    fn lookup(&self, node: &Node, name: &str) -> Result<&'a Symbol> {
        resolve(self.local, self.global, name).ok_or_else(|| {
            TranslateError::at(
                node,
                ErrorKind::UnknownSymbol {
                    name: name.to_string(),
                },
            )
        })
    }
}

fn no_rule(node: &Node, construct: Construct) -> TranslateError {
    TranslateError::at(
        node,
        ErrorKind::NoRuleForNode {
            context: construct.name(),
        },
    )
}

fn expect_token(node: &Node, text: &str, construct: Construct) -> Result<()> {
    if node.role() == Role::Token && node.content == text {
        Ok(())
    } else {
        Err(no_rule(node, construct))
    }
}

fn name_of(node: &Node) -> Result<&str> {
    if node.is_terminal() {
        Ok(node.content.as_str())
    } else {
        Err(TranslateError::at(
            node,
            ErrorKind::NoRuleForNode {
                context: "variable",
            },
        ))
    }
}

// Only constant indices can be checked before run time.
fn check_index(node: &Node, symbol: &Symbol, index: &Node) -> Result<()> {
    if symbol.kind() != SymbolKind::Vector {
        return Err(TranslateError::at(
            node,
            ErrorKind::NotAVector {
                name: symbol.name().to_string(),
            },
        ));
    }
    let constant = match index.role() {
        Role::Literal => index.content.parse::<usize>().ok(),
        _ => None,
    };
    match (constant, symbol.capacity()) {
        (Some(index), Some(capacity)) if index >= capacity => Err(TranslateError::at(
            node,
            ErrorKind::IndexOutOfRange {
                name: symbol.name().to_string(),
                index,
                capacity,
            },
        )),
        _ => Ok(()),
    }
}
