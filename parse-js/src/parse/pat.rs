use crate::ast::decl::PatDecl;
use crate::ast::node::Node;
use crate::ast::pat::{ArrPat, ArrPatElem, IdPat, ObjPat, ObjPatProp, Pat};
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

use super::Parser;

impl<'a> Parser<'a> {
  pub fn id_pat(&mut self) -> SyntaxResult<Node<IdPat>> {
    let t = self.require_identifier()?;
    Ok(Node::new(t.loc, IdPat {
      name: self.string(t.loc),
    }))
  }

  pub fn id_pat_decl(&mut self) -> SyntaxResult<Node<PatDecl>> {
    let id = self.id_pat()?;
    Ok(id.into_wrapped::<Pat>().wrap(|pat| PatDecl { pat }))
  }

  pub fn pat(&mut self) -> SyntaxResult<Node<Pat>> {
    match self.peek_typ() {
      TT::BraceOpen => Ok(self.obj_pat()?.into_wrapped()),
      TT::BracketOpen => Ok(self.arr_pat()?.into_wrapped()),
      _ => Ok(self.id_pat()?.into_wrapped()),
    }
  }

  pub fn pat_decl(&mut self) -> SyntaxResult<Node<PatDecl>> {
    let pat = self.pat()?;
    Ok(pat.wrap(|pat| PatDecl { pat }))
  }

  fn obj_pat(&mut self) -> SyntaxResult<Node<ObjPat>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      let mut rest = None;
      loop {
        if p.consume_if(TT::BraceClose).is_match() {
          break;
        }
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.id_pat()?);
          p.require(TT::BraceClose)?;
          break;
        }
        properties.push(p.obj_pat_prop()?);
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BraceClose)?;
          break;
        }
      }
      Ok(ObjPat { properties, rest })
    })
  }

  fn obj_pat_prop(&mut self) -> SyntaxResult<Node<ObjPatProp>> {
    self.with_loc(|p| {
      let key_tok = p.consume();
      if !key_tok.typ.is_property_name() {
        return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("object pattern key")));
      }
      let key = p.string(key_tok.loc);
      let (target, shorthand) = if p.consume_if(TT::Colon).is_match() {
        (p.pat()?, false)
      } else {
        if !key_tok.typ.is_identifier_like() {
          return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("binding identifier")));
        }
        let id = Node::new(key_tok.loc, IdPat { name: key.clone() });
        (id.into_wrapped(), true)
      };
      let default_value = p
        .consume_if(TT::Equals)
        .and_then(p, |p| p.assign_expr())?;
      Ok(ObjPatProp {
        key,
        target,
        shorthand,
        default_value,
      })
    })
  }

  fn arr_pat(&mut self) -> SyntaxResult<Node<ArrPat>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      let mut rest = None;
      loop {
        if p.consume_if(TT::BracketClose).is_match() {
          break;
        }
        if p.consume_if(TT::Comma).is_match() {
          elements.push(None);
          continue;
        }
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.pat()?);
          p.require(TT::BracketClose)?;
          break;
        }
        let target = p.pat()?;
        let default_value = p
          .consume_if(TT::Equals)
          .and_then(p, |p| p.assign_expr())?;
        elements.push(Some(ArrPatElem {
          target,
          default_value,
        }));
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BracketClose)?;
          break;
        }
      }
      Ok(ArrPat { elements, rest })
    })
  }
}
