use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

use super::expr::Expr;
use super::func::Func;
use super::node::Node;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ClassOrObjKey {
  #[drive(skip)]
  Direct(String),
  Computed(Node<Expr>),
}

impl ClassOrObjKey {
  pub fn as_direct(&self) -> Option<&str> {
    match self {
      ClassOrObjKey::Direct(name) => Some(name),
      ClassOrObjKey::Computed(_) => None,
    }
  }
}

/// A class body member. Only methods are represented; the subset has no
/// field declarations.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassMember {
  #[drive(skip)]
  pub static_: bool,
  pub key: ClassOrObjKey,
  pub func: Node<Func>,
}

/// An object literal member.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  pub key: ClassOrObjKey,
  // If `shorthand`, `value` is an identifier expression spelled the same as
  // the key; the emitter restores the shorthand form only while that holds.
  #[drive(skip)]
  pub shorthand: bool,
  pub value: Node<Expr>,
}
