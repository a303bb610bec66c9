use ast::node::Node;
use ast::stx::TopLevel;
use error::SyntaxResult;
use parse::Parser;

pub mod ast;
pub mod error;
pub mod lex;
pub mod loc;
pub mod operator;
pub mod parse;
pub mod token;

pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  let lexed = lex::lex(source)?;
  let mut parser = Parser::new(source, lexed);
  parser.parse_top_level()
}
