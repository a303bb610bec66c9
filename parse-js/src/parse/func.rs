use crate::ast::class_or_object::{ClassMember, ClassOrObjKey};
use crate::ast::decl::ParamDecl;
use crate::ast::func::{Func, FuncBody};
use crate::ast::node::Node;
use crate::ast::pat::ClassOrFuncName;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

use super::Parser;

impl<'a> Parser<'a> {
  pub fn class_or_func_name(&mut self) -> SyntaxResult<Node<ClassOrFuncName>> {
    let t = self.require_identifier()?;
    Ok(Node::new(t.loc, ClassOrFuncName {
      name: self.string(t.loc),
    }))
  }

  /// Parses `(parameters) { body }`, the shared tail of function
  /// declarations, function expressions and class methods.
  pub fn func_from_parameters(&mut self) -> SyntaxResult<Node<Func>> {
    self.with_loc(|p| {
      let parameters = p.func_parameters()?;
      let body = p.func_block_body()?;
      Ok(Func {
        arrow: false,
        parameters,
        body: FuncBody::Block(body),
      })
    })
  }

  pub fn arrow_func(&mut self) -> SyntaxResult<Node<Func>> {
    self.with_loc(|p| {
      let parameters = if p.peek_typ() == TT::ParenthesisOpen {
        p.func_parameters()?
      } else {
        // Single-identifier shorthand: `x => ...`.
        let pattern = p.id_pat_decl()?;
        vec![pattern.wrap(|pattern| ParamDecl {
          rest: false,
          pattern,
          default_value: None,
        })]
      };
      p.require(TT::EqualsChevronRight)?;
      let body = if p.peek_typ() == TT::BraceOpen {
        FuncBody::Block(p.func_block_body()?)
      } else {
        FuncBody::Expression(p.assign_expr()?)
      };
      Ok(Func {
        arrow: true,
        parameters,
        body,
      })
    })
  }

  fn func_parameters(&mut self) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.require(TT::ParenthesisOpen)?;
    self.list(TT::Comma, TT::ParenthesisClose, |p| {
      p.with_loc(|p| {
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let pattern = p.pat_decl()?;
        let default_value = p.consume_if(TT::Equals).and_then(p, |p| p.assign_expr())?;
        Ok(ParamDecl {
          rest,
          pattern,
          default_value,
        })
      })
    })
  }

  fn func_block_body(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.require(TT::BraceOpen)?;
    let mut body = Vec::new();
    while !self.consume_if(TT::BraceClose).is_match() {
      if self.peek_typ() == TT::EOF {
        return Err(self.peek().error(SyntaxErrorType::UnexpectedEnd));
      }
      body.push(self.stmt()?);
    }
    Ok(body)
  }

  pub fn class_members(&mut self) -> SyntaxResult<Vec<Node<ClassMember>>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      if self.consume_if(TT::BraceClose).is_match() {
        break;
      }
      if self.consume_if(TT::Semicolon).is_match() {
        continue;
      }
      members.push(self.class_member()?);
    }
    Ok(members)
  }

  fn class_member(&mut self) -> SyntaxResult<Node<ClassMember>> {
    let doc = self.take_doc();
    let mut node = self.with_loc(|p| {
      // `static` doubles as a method name when followed by `(`.
      let static_ =
        p.peek_typ() == TT::KeywordStatic && p.peek_at(1) != TT::ParenthesisOpen && {
          p.consume();
          true
        };
      let key = if p.peek_typ() == TT::BracketOpen {
        p.consume();
        let key = p.expr()?;
        p.require(TT::BracketClose)?;
        ClassOrObjKey::Computed(key)
      } else {
        let t = p.require_property_name()?;
        ClassOrObjKey::Direct(p.string(t.loc))
      };
      let func = p.func_from_parameters()?;
      Ok(ClassMember { static_, key, func })
    })?;
    if let Some(doc) = doc {
      node.assoc.set(doc);
    }
    Ok(node)
  }
}
