use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::decl::ParamDecl;
use super::expr::Expr;
use super::node::Node;
use super::stmt::Stmt;

// One common type for every function-like body (declarations, expressions,
// arrows, class methods); downstream passes match on a single shape.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub arrow: bool,
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: FuncBody,
}

// A function body is not a block statement: the scope opens with the
// parameters, not the braces.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // If arrow function.
  Expression(Node<Expr>),
}
