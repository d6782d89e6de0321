#![allow(clippy::empty_docs)]
#[derive(Parser)]
#[grammar = "parser/wl_grammar.pest"] // relative to src
pub struct WlParser;

use pest::error::{Error, ErrorVariant};
use pest::iterators::Pair;
use pest::{Parser, Position};

use crate::ast::{Node, StringSpan};

fn span_of(pair: &Pair<Rule>) -> Option<StringSpan> {
    Some(StringSpan {
        pos_start: pair.as_span().start(),
        pos_end: pair.as_span().end(),
    })
}

fn rule_name(rule: Rule) -> &'static str {
    match rule {
        Rule::function => "function",
        Rule::array => "array",
        Rule::value => "value",
        Rule::product => "product",
        Rule::expression => "expression",
        Rule::leftside => "leftside",
        Rule::assignment => "assignment",
        Rule::block => "block",
        Rule::parlist => "parlist",
        Rule::varlist => "varlist",
        Rule::veclist => "veclist",
        Rule::system => "system",
        _ => "regex",
    }
}

fn lower(pair: Pair<'_, Rule>) -> Node {
    let span = span_of(&pair);
    let text = pair.as_str();
    let node = match pair.as_rule() {
        // name    = @{ !keyword ~ ASCII_ALPHA ~ ident_char* }
        Rule::name => Node::leaf("variable|regex", text),

        // integer = @{ ASCII_DIGIT+ }
        // float   = @{ ASCII_DIGIT* ~ "." ~ ASCII_DIGIT+ }
        Rule::integer => Node::leaf("integer|regex", text),
        Rule::float => Node::leaf("float|regex", text),

        Rule::arrow => Node::leaf("regex", text),
        Rule::add_op
        | Rule::mul_op
        | Rule::lparen
        | Rule::rparen
        | Rule::lbracket
        | Rule::rbracket
        | Rule::comma
        | Rule::sep
        | Rule::semi => Node::leaf("char", text),
        Rule::kw_catastrophe
        | Rule::kw_parameters
        | Rule::kw_variables
        | Rule::kw_vectors
        | Rule::kw_system
        | Rule::kw_begin
        | Rule::kw_end => Node::leaf("string", text),
        Rule::EOI => Node::leaf("regex", ""),

        // a rule with a single child is folded into it, keeping the rule name
        Rule::function
        | Rule::array
        | Rule::value
        | Rule::product
        | Rule::expression
        | Rule::leftside
        | Rule::assignment
        | Rule::block
        | Rule::parlist
        | Rule::varlist
        | Rule::veclist
        | Rule::system => {
            let name = rule_name(pair.as_rule());
            let mut children: Vec<Node> = pair.into_inner().map(lower).collect();
            if children.len() == 1 {
                return children.remove(0).wrap_tag(name);
            }
            Node::branch(format!("{}|>", name), children)
        }

        // program = { SOI ~ kw_catastrophe ~ name ~ (declist | system)* ~ block ~ EOI }
        Rule::program => {
            let start = Node::leaf("regex", "").with_span(Some(StringSpan {
                pos_start: 0,
                pos_end: 0,
            }));
            let children = std::iter::once(start)
                .chain(pair.into_inner().map(lower))
                .collect();
            Node::branch(">", children)
        }
        _ => unreachable!("{:?}", pair.to_string()),
    };
    node.with_span(span)
}

pub fn parse_string(text: &str) -> Result<Node, Box<Error<Rule>>> {
    let program = WlParser::parse(Rule::program, text)
        .map_err(Box::new)?
        .next()
        .ok_or_else(|| {
            Box::new(Error::new_from_pos(
                ErrorVariant::CustomError {
                    message: "empty program".to_string(),
                },
                Position::from_start(text),
            ))
        })?;
    Ok(lower(program))
}
