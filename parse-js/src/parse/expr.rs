use crate::ast::class_or_object::{ClassOrObjKey, ObjMember};
use crate::ast::expr::{
  ArrowFuncExpr, AssignExpr, BinaryExpr, CallArg, CallExpr, ClassExpr, ComputedMemberExpr,
  CondExpr, Expr, FuncExpr, IdExpr, LitArrElem, LitArrExpr, LitBoolExpr, LitNullExpr, LitNumExpr,
  LitObjExpr, LitStrExpr, MemberExpr, NewExpr, ThisExpr, UnaryExpr, UnaryPostfixExpr,
};
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::token::TT;

use super::Parser;

fn binary_operator(tt: TT) -> Option<OperatorName> {
  Some(match tt {
    TT::Ampersand => OperatorName::BitwiseAnd,
    TT::AmpersandAmpersand => OperatorName::LogicalAnd,
    TT::Asterisk => OperatorName::Multiplication,
    TT::Bar => OperatorName::BitwiseOr,
    TT::BarBar => OperatorName::LogicalOr,
    TT::Caret => OperatorName::BitwiseXor,
    TT::ChevronLeft => OperatorName::LessThan,
    TT::ChevronLeftChevronLeft => OperatorName::BitwiseLeftShift,
    TT::ChevronLeftEquals => OperatorName::LessThanOrEqual,
    TT::ChevronRight => OperatorName::GreaterThan,
    TT::ChevronRightChevronRight => OperatorName::BitwiseRightShift,
    TT::ChevronRightChevronRightChevronRight => OperatorName::BitwiseUnsignedRightShift,
    TT::ChevronRightEquals => OperatorName::GreaterThanOrEqual,
    TT::EqualsEquals => OperatorName::Equality,
    TT::EqualsEqualsEquals => OperatorName::StrictEquality,
    TT::ExclamationEquals => OperatorName::Inequality,
    TT::ExclamationEqualsEquals => OperatorName::StrictInequality,
    TT::Hyphen => OperatorName::Subtraction,
    TT::KeywordIn => OperatorName::In,
    TT::KeywordInstanceof => OperatorName::Instanceof,
    TT::Percent => OperatorName::Remainder,
    TT::Plus => OperatorName::Addition,
    TT::QuestionQuestion => OperatorName::NullishCoalescing,
    TT::Slash => OperatorName::Division,
    _ => return None,
  })
}

fn assignment_operator(tt: TT) -> Option<OperatorName> {
  Some(match tt {
    TT::Equals => OperatorName::Assignment,
    TT::PlusEquals => OperatorName::AssignmentAddition,
    TT::HyphenEquals => OperatorName::AssignmentSubtraction,
    TT::AsteriskEquals => OperatorName::AssignmentMultiplication,
    TT::SlashEquals => OperatorName::AssignmentDivision,
    TT::PercentEquals => OperatorName::AssignmentRemainder,
    _ => return None,
  })
}

fn is_assignment_target(expr: &Expr) -> bool {
  matches!(
    expr,
    Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_)
  )
}

/// Decodes the escapes of a string literal token's raw text (including its
/// quotes) into the string value.
pub fn normalise_literal_string(raw: &str) -> String {
  let inner = &raw[1..raw.len() - 1];
  let mut out = String::with_capacity(inner.len());
  let mut chars = inner.chars();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next() {
      Some('n') => out.push('\n'),
      Some('t') => out.push('\t'),
      Some('r') => out.push('\r'),
      Some('0') => out.push('\0'),
      Some('b') => out.push('\u{8}'),
      Some('f') => out.push('\u{c}'),
      Some('v') => out.push('\u{b}'),
      Some(other) => out.push(other),
      None => {}
    }
  }
  out
}

impl<'a> Parser<'a> {
  pub fn expr(&mut self) -> SyntaxResult<Node<Expr>> {
    self.assign_expr()
  }

  pub fn assign_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    if self.is_arrow_ahead() {
      return Ok(self.arrow_func_expr()?.into_wrapped());
    }
    let lhs = self.cond_expr()?;
    let Some(operator) = assignment_operator(self.peek_typ()) else {
      return Ok(lhs);
    };
    if !is_assignment_target(&lhs.stx) {
      return Err(lhs.loc.error(SyntaxErrorType::InvalidAssigmentTarget, None));
    }
    self.consume();
    let value = self.assign_expr()?;
    let loc = lhs.loc + value.loc;
    Ok(
      Node::new(loc, AssignExpr {
        operator,
        target: lhs,
        value,
      })
      .into_wrapped(),
    )
  }

  fn cond_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let test = self.binary_expr(0)?;
    if !self.consume_if(TT::Question).is_match() {
      return Ok(test);
    }
    let consequent = self.assign_expr()?;
    self.require(TT::Colon)?;
    let alternate = self.assign_expr()?;
    let loc = test.loc + alternate.loc;
    Ok(
      Node::new(loc, CondExpr {
        test,
        consequent,
        alternate,
      })
      .into_wrapped(),
    )
  }

  fn binary_expr(&mut self, min_prec: u8) -> SyntaxResult<Node<Expr>> {
    let mut left = self.unary_expr()?;
    loop {
      let Some(operator) = binary_operator(self.peek_typ()) else {
        break;
      };
      let prec = operator.binary_precedence().unwrap();
      if prec < min_prec {
        break;
      }
      self.consume();
      let right = self.binary_expr(prec + 1)?;
      let loc = left.loc + right.loc;
      left = Node::new(loc, BinaryExpr {
        operator,
        left,
        right,
      })
      .into_wrapped();
    }
    Ok(left)
  }

  fn unary_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let operator = match self.peek_typ() {
      TT::Exclamation => Some(OperatorName::LogicalNot),
      TT::Tilde => Some(OperatorName::BitwiseNot),
      TT::Plus => Some(OperatorName::UnaryPlus),
      TT::Hyphen => Some(OperatorName::UnaryNegation),
      TT::PlusPlus => Some(OperatorName::PrefixIncrement),
      TT::HyphenHyphen => Some(OperatorName::PrefixDecrement),
      TT::KeywordTypeof => Some(OperatorName::Typeof),
      TT::KeywordVoid => Some(OperatorName::Void),
      TT::KeywordDelete => Some(OperatorName::Delete),
      _ => None,
    };
    if let Some(operator) = operator {
      let start = self.consume().loc;
      let argument = self.unary_expr()?;
      let loc = start + argument.loc;
      return Ok(Node::new(loc, UnaryExpr { operator, argument }).into_wrapped());
    }
    if self.peek_typ() == TT::KeywordNew {
      return self.new_expr();
    }
    let primary = self.primary_expr()?;
    self.postfix_tail(primary, true)
  }

  fn new_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::KeywordNew)?.loc;
    let callee = {
      let primary = self.primary_expr()?;
      self.postfix_tail(primary, false)?
    };
    let arguments = if self.peek_typ() == TT::ParenthesisOpen {
      Some(self.call_args()?)
    } else {
      None
    };
    let loc = Loc(start.0, self.last_consumed_end);
    let new = Node::new(loc, NewExpr { callee, arguments }).into_wrapped();
    self.postfix_tail(new, true)
  }

  /// Member accesses, calls and update operators on `base`. `allow_calls` is
  /// false while parsing a `new` callee, where a call would belong to the
  /// `new` itself.
  fn postfix_tail(&mut self, mut base: Node<Expr>, allow_calls: bool) -> SyntaxResult<Node<Expr>> {
    loop {
      match self.peek_typ() {
        TT::Dot => {
          self.consume();
          let prop = self.require_property_name()?;
          let loc = base.loc + prop.loc;
          let right = self.string(prop.loc);
          base = Node::new(loc, MemberExpr { left: base, right }).into_wrapped();
        }
        TT::BracketOpen => {
          self.consume();
          let member = self.expr()?;
          let end = self.require(TT::BracketClose)?.loc;
          let loc = base.loc + end;
          base = Node::new(loc, ComputedMemberExpr {
            object: base,
            member,
          })
          .into_wrapped();
        }
        TT::ParenthesisOpen if allow_calls => {
          let arguments = self.call_args()?;
          let loc = Loc(base.loc.0, self.last_consumed_end);
          base = Node::new(loc, CallExpr {
            callee: base,
            arguments,
          })
          .into_wrapped();
        }
        TT::PlusPlus | TT::HyphenHyphen => {
          let t = self.peek();
          // An update operator on a new line belongs to the next statement.
          if t.preceded_by_line_terminator {
            break;
          }
          if !is_assignment_target(&base.stx) {
            break;
          }
          self.consume();
          let operator = if t.typ == TT::PlusPlus {
            OperatorName::PostfixIncrement
          } else {
            OperatorName::PostfixDecrement
          };
          let loc = base.loc + t.loc;
          base = Node::new(loc, UnaryPostfixExpr {
            operator,
            argument: base,
          })
          .into_wrapped();
          break;
        }
        _ => break,
      }
    }
    Ok(base)
  }

  fn call_args(&mut self) -> SyntaxResult<Vec<Node<CallArg>>> {
    self.require(TT::ParenthesisOpen)?;
    self.list(TT::Comma, TT::ParenthesisClose, |p| {
      p.with_loc(|p| {
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value = p.assign_expr()?;
        Ok(CallArg { spread, value })
      })
    })
  }

  fn primary_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.peek();
    match t.typ {
      TT::LiteralNumber => {
        self.consume();
        Ok(
          Node::new(t.loc, LitNumExpr {
            raw: self.string(t.loc),
          })
          .into_wrapped(),
        )
      }
      TT::LiteralString => {
        self.consume();
        let raw = self.string(t.loc);
        let value = normalise_literal_string(&raw);
        Ok(Node::new(t.loc, LitStrExpr { raw, value }).into_wrapped())
      }
      TT::KeywordTrue | TT::KeywordFalse => {
        self.consume();
        Ok(
          Node::new(t.loc, LitBoolExpr {
            value: t.typ == TT::KeywordTrue,
          })
          .into_wrapped(),
        )
      }
      TT::KeywordNull => {
        self.consume();
        Ok(Node::new(t.loc, LitNullExpr {}).into_wrapped())
      }
      TT::KeywordThis => {
        self.consume();
        Ok(Node::new(t.loc, ThisExpr {}).into_wrapped())
      }
      TT::ParenthesisOpen => {
        self.consume();
        let inner = self.expr()?;
        self.require(TT::ParenthesisClose)?;
        Ok(inner)
      }
      TT::BracketOpen => self.lit_arr_expr(),
      TT::BraceOpen => self.lit_obj_expr(),
      TT::KeywordFunction => Ok(self.func_expr()?.into_wrapped()),
      TT::KeywordClass => Ok(self.class_expr()?.into_wrapped()),
      typ if typ.is_identifier_like() => {
        self.consume();
        Ok(
          Node::new(t.loc, IdExpr {
            name: self.string(t.loc),
          })
          .into_wrapped(),
        )
      }
      TT::EOF => Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("expression"))),
    }
  }

  fn lit_arr_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let node = self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      loop {
        if p.consume_if(TT::BracketClose).is_match() {
          break;
        }
        if p.consume_if(TT::Comma).is_match() {
          elements.push(LitArrElem::Empty);
          continue;
        }
        let elem = if p.consume_if(TT::DotDotDot).is_match() {
          LitArrElem::Spread(p.assign_expr()?)
        } else {
          LitArrElem::Single(p.assign_expr()?)
        };
        elements.push(elem);
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BracketClose)?;
          break;
        }
      }
      Ok(LitArrExpr { elements })
    })?;
    Ok(node.into_wrapped())
  }

  fn lit_obj_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let node = self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let members = p.list(TT::Comma, TT::BraceClose, |p| p.obj_member())?;
      Ok(LitObjExpr { members })
    })?;
    Ok(node.into_wrapped())
  }

  fn obj_member(&mut self) -> SyntaxResult<Node<ObjMember>> {
    self.with_loc(|p| {
      if p.peek_typ() == TT::BracketOpen {
        p.consume();
        let key = p.expr()?;
        p.require(TT::BracketClose)?;
        p.require(TT::Colon)?;
        let value = p.assign_expr()?;
        return Ok(ObjMember {
          key: ClassOrObjKey::Computed(key),
          shorthand: false,
          value,
        });
      }
      let key_tok = p.consume();
      let key = if key_tok.typ == TT::LiteralString || key_tok.typ == TT::LiteralNumber {
        p.string(key_tok.loc)
      } else if key_tok.typ.is_property_name() {
        p.string(key_tok.loc)
      } else {
        return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("object key")));
      };
      if p.consume_if(TT::Colon).is_match() {
        let value = p.assign_expr()?;
        Ok(ObjMember {
          key: ClassOrObjKey::Direct(key),
          shorthand: false,
          value,
        })
      } else {
        if !key_tok.typ.is_identifier_like() {
          return Err(key_tok.error(SyntaxErrorType::ExpectedSyntax("object member value")));
        }
        let value = Node::new(key_tok.loc, IdExpr { name: key.clone() }).into_wrapped();
        Ok(ObjMember {
          key: ClassOrObjKey::Direct(key),
          shorthand: true,
          value,
        })
      }
    })
  }

  fn is_arrow_ahead(&self) -> bool {
    let t = &self.tokens[self.next];
    if t.typ.is_identifier_like() {
      return self.peek_at(1) == TT::EqualsChevronRight;
    }
    if t.typ != TT::ParenthesisOpen {
      return false;
    }
    let mut depth = 0usize;
    let mut i = self.next;
    loop {
      match self.tokens.get(i).map(|t| t.typ).unwrap_or(TT::EOF) {
        TT::ParenthesisOpen => depth += 1,
        TT::ParenthesisClose => {
          depth -= 1;
          if depth == 0 {
            return self
              .tokens
              .get(i + 1)
              .map(|t| t.typ == TT::EqualsChevronRight)
              .unwrap_or(false);
          }
        }
        TT::EOF => return false,
        _ => {}
      }
      i += 1;
    }
  }

  fn arrow_func_expr(&mut self) -> SyntaxResult<Node<ArrowFuncExpr>> {
    self.with_loc(|p| {
      let func = p.arrow_func()?;
      Ok(ArrowFuncExpr { func })
    })
  }

  fn func_expr(&mut self) -> SyntaxResult<Node<FuncExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFunction)?;
      let name = if p.peek_typ().is_identifier_like() {
        Some(p.class_or_func_name()?)
      } else {
        None
      };
      let func = p.func_from_parameters()?;
      Ok(FuncExpr { name, func })
    })
  }

  fn class_expr(&mut self) -> SyntaxResult<Node<ClassExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name = if p.peek_typ().is_identifier_like() {
        Some(p.class_or_func_name()?)
      } else {
        None
      };
      let extends = p.consume_if(TT::KeywordExtends).and_then(p, |p| p.expr())?;
      let members = p.class_members()?;
      Ok(ClassExpr {
        name,
        extends,
        members,
      })
    })
  }
}
