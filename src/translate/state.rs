use log::debug;

use crate::ast::{DeclKind, Node, Role};

use super::emit::Emitter;
use super::error::{ErrorKind, Result, TranslateError};
use super::model::Catastrophe;
use super::options::{TrailingScope, TranslatorOptions};
use super::scope::{SymbolKind, SymbolTable};
use super::walker::Walker;
use super::Translation;

/// Position of the top-level state machine within the program root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopState {
    Initial,
    ExpectCatastropheKeyword,
    ExpectCatastropheName,
    AwaitingDeclarationOrSystem,
    DeclarationList,
    System,
    TrailingBlock,
    Done,
}

/// Everything one translation run owns. Built fresh for each program.
pub struct TranslationContext<'o> {
    options: &'o TranslatorOptions,
    catastrophe: Catastrophe,
    state: TopState,
    current_system: Option<usize>,
    emitter: Emitter,
}

impl<'o> TranslationContext<'o> {
    pub fn new(options: &'o TranslatorOptions) -> Self {
        Self {
            options,
            catastrophe: Catastrophe::new(options),
            state: TopState::Initial,
            current_system: None,
            emitter: Emitter::new(options.indent.as_str()),
        }
    }

    pub fn state(&self) -> TopState {
        self.state
    }

    pub fn catastrophe(&self) -> &Catastrophe {
        &self.catastrophe
    }

    /// Text emitted so far.
    pub fn output(&self) -> &str {
        self.emitter.output()
    }

    /// Feed every direct child of `root` through the state machine, in order.
    pub fn run(mut self, root: &Node) -> Result<Translation> {
        for child in &root.children {
            self.step(child)?;
        }
        self.finish(root)?;
        Ok(Translation {
            catastrophe: self.catastrophe,
            output: self.emitter.into_output(),
        })
    }

    pub fn step(&mut self, node: &Node) -> Result<()> {
        use TopState::*;
        let next = match (self.state, node.role()) {
            (Initial, Role::Token) => ExpectCatastropheKeyword,
            (ExpectCatastropheKeyword, Role::Token) => ExpectCatastropheName,
            (ExpectCatastropheName, _) => {
                self.catastrophe_name(node)?;
                AwaitingDeclarationOrSystem
            }
            (AwaitingDeclarationOrSystem | DeclarationList | System, Role::DeclarationList(kind)) => {
                let global = self.catastrophe.globals_mut();
                declare_list(global, kind, node)?;
                DeclarationList
            }
            (DeclarationList | System, Role::System) => {
                self.system(node)?;
                System
            }
            (DeclarationList | System, Role::Block) if self.current_system.is_some() => {
                self.trailing_block(node)?;
                TrailingBlock
            }
            (TrailingBlock, Role::Token) if node.content.is_empty() => Done,
            // a block before any system, or end of input before the trailing block
            (state @ (AwaitingDeclarationOrSystem | DeclarationList | System), Role::Block) => {
                return Err(TranslateError::at(node, ErrorKind::IncompleteProgram { state }))
            }
            (state @ (AwaitingDeclarationOrSystem | DeclarationList | System), Role::Token)
                if node.content.is_empty() =>
            {
                return Err(TranslateError::at(node, ErrorKind::IncompleteProgram { state }))
            }
            (state, _) => {
                return Err(TranslateError::at(node, ErrorKind::UnexpectedNode { state }))
            }
        };
        debug!("{:?} -> {:?} on '{}'", self.state, next, node.tag);
        self.state = next;
        Ok(())
    }

    /// Check that the program reached its closing block.
    pub fn finish(&mut self, root: &Node) -> Result<()> {
        match self.state {
            TopState::TrailingBlock | TopState::Done => {
                self.state = TopState::Done;
                Ok(())
            }
            state => Err(TranslateError::at(
                root,
                ErrorKind::IncompleteProgram { state },
            )),
        }
    }

    fn catastrophe_name(&mut self, node: &Node) -> Result<()> {
        if node.tag != "variable|regex" || !node.is_terminal() {
            return Err(TranslateError::at(
                node,
                ErrorKind::MalformedHeader {
                    reason: "expected the catastrophe name".to_string(),
                },
            ));
        }
        self.catastrophe
            .set_name(&node.content)
            .map_err(|kind| TranslateError::at(node, kind))?;
        debug!("catastrophe {}", node.content);
        Ok(())
    }

    fn system(&mut self, node: &Node) -> Result<()> {
        let mut parts = node.children.iter().filter(|c| c.role() != Role::Token);
        let name = match parts.next() {
            Some(n) if n.role() == Role::Variable && n.is_terminal() => n,
            other => return Err(malformed(other.unwrap_or(node), "expected a system name")),
        };
        let equations = parts
            .next()
            .filter(|n| n.role() == Role::Literal)
            .and_then(|n| n.content.parse::<usize>().ok())
            .ok_or_else(|| malformed(name, "expected an integer equation count"))?;

        let index = self
            .catastrophe
            .add_system(&name.content, equations)
            .map_err(|kind| TranslateError::at(name, kind))?;
        self.current_system = Some(index);
        debug!("system {}({})", name.content, equations);

        let mut translated = false;
        for part in parts {
            match part.role() {
                Role::DeclarationList(kind) if !translated => {
                    let local = self.local_scope_mut(index, part)?;
                    declare_list(local, kind, part)?;
                }
                Role::Block if !translated => {
                    let local = self.catastrophe.system(index).map(|s| s.scope());
                    let walker = Walker::new(local, self.catastrophe.globals(), self.options);
                    walker.block(part, &mut self.emitter)?;
                    translated = true;
                }
                _ => {
                    return Err(TranslateError::at(
                        part,
                        ErrorKind::UnexpectedNode { state: self.state },
                    ))
                }
            }
        }
        if !translated {
            return Err(TranslateError::at(
                node,
                ErrorKind::IncompleteProgram { state: TopState::System },
            ));
        }
        Ok(())
    }

    fn trailing_block(&mut self, node: &Node) -> Result<()> {
        let local = match self.options.trailing_scope {
            TrailingScope::LastSystem => self
                .current_system
                .and_then(|index| self.catastrophe.system(index))
                .map(|s| s.scope()),
            TrailingScope::Global => None,
        };
        debug!(
            "trailing block resolved against {}",
            local.map(|s| s.owner()).unwrap_or("globals only")
        );
        let walker = Walker::new(local, self.catastrophe.globals(), self.options);
        walker.block(node, &mut self.emitter)
    }

    fn local_scope_mut(&mut self, index: usize, node: &Node) -> Result<&mut SymbolTable> {
        let state = self.state;
        self.catastrophe
            .system_mut(index)
            .map(|s| s.scope_mut())
            .ok_or_else(|| TranslateError::at(node, ErrorKind::UnexpectedNode { state }))
    }
}

/// Fold a `PARAMETERS`, `VARIABLES` or `VECTORS` list into `table`.
fn declare_list(table: &mut SymbolTable, kind: DeclKind, node: &Node) -> Result<()> {
    for item in &node.children {
        match (kind, item.role()) {
            (_, Role::Token) => continue,
            (DeclKind::Parameters, Role::Variable) => {
                declare(table, item, &item.content, SymbolKind::Parameter, None)?
            }
            (DeclKind::Variables, Role::Variable) => {
                declare(table, item, &item.content, SymbolKind::Variable, None)?
            }
            (DeclKind::Vectors, Role::Array) => {
                let (name, capacity) = vector_decl(item)?;
                declare(table, item, name, SymbolKind::Vector, Some(capacity))?
            }
            (DeclKind::Vectors, Role::Variable) => {
                return Err(malformed(item, "vectors need a [capacity]"));
            }
            _ => {
                return Err(TranslateError::at(
                    item,
                    ErrorKind::NoRuleForNode {
                        context: "declaration list",
                    },
                ))
            }
        }
    }
    Ok(())
}

fn declare(
    table: &mut SymbolTable,
    node: &Node,
    name: &str,
    kind: SymbolKind,
    capacity: Option<usize>,
) -> Result<()> {
    if name.is_empty() {
        return Err(malformed(node, "empty identifier"));
    }
    table
        .declare(name, kind, capacity)
        .map_err(|e| TranslateError::at(node, e))?;
    debug!("{}: declared {} as {:?}", table.owner(), name, kind);
    Ok(())
}

// `Y[6]`: a name followed by a bracketed integer literal
fn vector_decl(node: &Node) -> Result<(&str, usize)> {
    let mut parts = node.children.iter().filter(|c| c.role() != Role::Token);
    let name = parts
        .next()
        .filter(|n| n.role() == Role::Variable && n.is_terminal())
        .ok_or_else(|| malformed(node, "expected a vector name"))?;
    let capacity = parts
        .next()
        .filter(|n| n.role() == Role::Literal)
        .and_then(|n| n.content.parse::<usize>().ok())
        .ok_or_else(|| malformed(node, "vector capacity must be an integer literal"))?;
    Ok((name.content.as_str(), capacity))
}

fn malformed(node: &Node, reason: &str) -> TranslateError {
    TranslateError::at(
        node,
        ErrorKind::MalformedHeader {
            reason: reason.to_string(),
        },
    )
}
