use crate::ast::decl::{ClassDecl, FuncDecl, VarDecl, VarDeclMode, VarDeclarator};
use crate::ast::node::Node;
use crate::ast::stmt::{
  BlockStmt, BreakStmt, CatchBlock, ContinueStmt, DebuggerStmt, DoWhileStmt, EmptyStmt, ExprStmt,
  ForBody, ForInOfDecl, ForInOfLhs, ForInStmt, ForOfStmt, ForTripleStmt, ForTripleStmtInit,
  IfStmt, ReturnStmt, Stmt, ThrowStmt, TryStmt, WhileStmt,
};
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

use super::Parser;

impl<'a> Parser<'a> {
  pub fn stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let doc = self.take_doc();
    let mut node = self.stmt_inner()?;
    if let Some(doc) = doc {
      node.assoc.set(doc);
    }
    Ok(node)
  }

  fn stmt_inner(&mut self) -> SyntaxResult<Node<Stmt>> {
    match self.peek_typ() {
      TT::BraceOpen => Ok(self.block_stmt()?.into_wrapped()),
      TT::KeywordBreak => Ok(self.break_stmt()?.into_wrapped()),
      TT::KeywordClass => Ok(self.class_decl(false, false)?.into_wrapped()),
      TT::KeywordContinue => Ok(self.continue_stmt()?.into_wrapped()),
      TT::KeywordDebugger => Ok(self.debugger_stmt()?.into_wrapped()),
      TT::KeywordDo => Ok(self.do_while_stmt()?.into_wrapped()),
      TT::KeywordExport => self.export_stmt(),
      TT::KeywordFor => self.for_stmt(),
      TT::KeywordFunction => Ok(self.func_decl(false, false)?.into_wrapped()),
      TT::KeywordIf => Ok(self.if_stmt()?.into_wrapped()),
      TT::KeywordImport => Ok(self.import_stmt()?.into_wrapped()),
      TT::KeywordReturn => Ok(self.return_stmt()?.into_wrapped()),
      TT::KeywordThrow => Ok(self.throw_stmt()?.into_wrapped()),
      TT::KeywordTry => Ok(self.try_stmt()?.into_wrapped()),
      TT::KeywordVar | TT::KeywordLet | TT::KeywordConst => {
        Ok(self.var_decl(false)?.into_wrapped())
      }
      TT::KeywordWhile => Ok(self.while_stmt()?.into_wrapped()),
      TT::Semicolon => {
        let t = self.consume();
        Ok(Node::new(t.loc, EmptyStmt {}).into_wrapped())
      }
      _ => {
        let stmt = self.with_loc(|p| {
          let expr = p.expr()?;
          p.eat_semicolon()?;
          Ok(ExprStmt { expr })
        })?;
        Ok(stmt.into_wrapped())
      }
    }
  }

  pub fn block_stmt(&mut self) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut body = Vec::new();
      while !p.consume_if(TT::BraceClose).is_match() {
        if p.peek_typ() == TT::EOF {
          return Err(p.peek().error(SyntaxErrorType::UnexpectedEnd));
        }
        body.push(p.stmt()?);
      }
      Ok(BlockStmt { body })
    })
  }

  fn break_stmt(&mut self) -> SyntaxResult<Node<BreakStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordBreak)?;
      p.eat_semicolon()?;
      Ok(BreakStmt {})
    })
  }

  fn continue_stmt(&mut self) -> SyntaxResult<Node<ContinueStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordContinue)?;
      p.eat_semicolon()?;
      Ok(ContinueStmt {})
    })
  }

  fn debugger_stmt(&mut self) -> SyntaxResult<Node<DebuggerStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDebugger)?;
      p.eat_semicolon()?;
      Ok(DebuggerStmt {})
    })
  }

  fn do_while_stmt(&mut self) -> SyntaxResult<Node<DoWhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDo)?;
      let body = p.stmt()?;
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr()?;
      p.require(TT::ParenthesisClose)?;
      p.eat_semicolon()?;
      Ok(DoWhileStmt { body, condition })
    })
  }

  fn if_stmt(&mut self) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.expr()?;
      p.require(TT::ParenthesisClose)?;
      let consequent = p.stmt()?;
      let alternate = p.consume_if(TT::KeywordElse).and_then(p, |p| p.stmt())?;
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  fn return_stmt(&mut self) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordReturn)?;
      let t = p.peek();
      let value = if t.typ == TT::Semicolon
        || t.typ == TT::BraceClose
        || t.typ == TT::EOF
        || t.preceded_by_line_terminator
      {
        None
      } else {
        Some(p.expr()?)
      };
      p.eat_semicolon()?;
      Ok(ReturnStmt { value })
    })
  }

  fn throw_stmt(&mut self) -> SyntaxResult<Node<ThrowStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordThrow)?;
      let value = p.expr()?;
      p.eat_semicolon()?;
      Ok(ThrowStmt { value })
    })
  }

  fn try_stmt(&mut self) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordTry)?;
      let wrapped = p.block_stmt()?;
      let catch = p.consume_if(TT::KeywordCatch).and_then(p, |p| {
        p.with_loc(|p| {
          let parameter = if p.consume_if(TT::ParenthesisOpen).is_match() {
            let pat = p.pat_decl()?;
            p.require(TT::ParenthesisClose)?;
            Some(pat)
          } else {
            None
          };
          p.require(TT::BraceOpen)?;
          let mut body = Vec::new();
          while !p.consume_if(TT::BraceClose).is_match() {
            if p.peek_typ() == TT::EOF {
              return Err(p.peek().error(SyntaxErrorType::UnexpectedEnd));
            }
            body.push(p.stmt()?);
          }
          Ok(CatchBlock { parameter, body })
        })
      })?;
      let finally = p
        .consume_if(TT::KeywordFinally)
        .and_then(p, |p| p.block_stmt())?;
      if catch.is_none() && finally.is_none() {
        return Err(
          start
            .loc
            .error(SyntaxErrorType::TryStatementHasNoCatchOrFinally, None),
        );
      }
      Ok(TryStmt {
        wrapped,
        catch,
        finally,
      })
    })
  }

  fn while_stmt(&mut self) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr()?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt()?;
      Ok(WhileStmt { condition, body })
    })
  }

  fn for_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordFor)?.loc;
    self.require(TT::ParenthesisOpen)?;
    // Distinguish the three `for` forms by parsing the head up to `in`, `of`
    // or `;`.
    let decl_mode = match self.peek_typ() {
      TT::KeywordVar => Some(VarDeclMode::Var),
      TT::KeywordLet => Some(VarDeclMode::Let),
      TT::KeywordConst => Some(VarDeclMode::Const),
      _ => None,
    };
    if let Some(mode) = decl_mode {
      // A single-pattern declaration can still be a for-in/of head.
      let decl_start = self.peek().loc;
      self.consume();
      let first_pat = self.pat_decl()?;
      match self.peek_typ() {
        TT::KeywordIn | TT::KeywordOf => {
          let of = self.consume().typ == TT::KeywordOf;
          let rhs = self.expr()?;
          self.require(TT::ParenthesisClose)?;
          let body = self.for_body()?;
          let lhs = ForInOfLhs::Decl(ForInOfDecl {
            mode,
            pat: first_pat,
          });
          let loc = start + body.loc;
          return Ok(if of {
            Node::new(loc, ForOfStmt { lhs, rhs, body }).into_wrapped()
          } else {
            Node::new(loc, ForInStmt { lhs, rhs, body }).into_wrapped()
          });
        }
        _ => {
          // Plain triple head; finish the declaration we started.
          let decl = self.var_decl_tail(false, mode, decl_start, first_pat)?;
          self.require(TT::Semicolon)?;
          return self.for_triple_tail(start, ForTripleStmtInit::Decl(decl));
        }
      }
    }
    if self.peek_typ() == TT::Semicolon {
      self.consume();
      return self.for_triple_tail(start, ForTripleStmtInit::None);
    }
    let expr = self.expr()?;
    match self.peek_typ() {
      TT::KeywordIn | TT::KeywordOf => {
        let of = self.consume().typ == TT::KeywordOf;
        let lhs = ForInOfLhs::Assign(self.expr_to_pat(expr)?);
        let rhs = self.expr()?;
        self.require(TT::ParenthesisClose)?;
        let body = self.for_body()?;
        let loc = start + body.loc;
        Ok(if of {
          Node::new(loc, ForOfStmt { lhs, rhs, body }).into_wrapped()
        } else {
          Node::new(loc, ForInStmt { lhs, rhs, body }).into_wrapped()
        })
      }
      _ => {
        self.require(TT::Semicolon)?;
        self.for_triple_tail(start, ForTripleStmtInit::Expr(expr))
      }
    }
  }

  fn for_triple_tail(
    &mut self,
    start: crate::loc::Loc,
    init: ForTripleStmtInit,
  ) -> SyntaxResult<Node<Stmt>> {
    let cond = if self.peek_typ() == TT::Semicolon {
      None
    } else {
      Some(self.expr()?)
    };
    self.require(TT::Semicolon)?;
    let post = if self.peek_typ() == TT::ParenthesisClose {
      None
    } else {
      Some(self.expr()?)
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.for_body()?;
    let loc = start + body.loc;
    Ok(
      Node::new(loc, ForTripleStmt {
        init,
        cond,
        post,
        body,
      })
      .into_wrapped(),
    )
  }

  fn for_body(&mut self) -> SyntaxResult<Node<ForBody>> {
    self.with_loc(|p| {
      let body = if p.peek_typ() == TT::BraceOpen {
        p.require(TT::BraceOpen)?;
        let mut body = Vec::new();
        while !p.consume_if(TT::BraceClose).is_match() {
          if p.peek_typ() == TT::EOF {
            return Err(p.peek().error(SyntaxErrorType::UnexpectedEnd));
          }
          body.push(p.stmt()?);
        }
        body
      } else {
        vec![p.stmt()?]
      };
      Ok(ForBody { body })
    })
  }

  fn expr_to_pat(
    &self,
    expr: Node<crate::ast::expr::Expr>,
  ) -> SyntaxResult<Node<crate::ast::pat::Pat>> {
    use crate::ast::expr::Expr;
    use crate::ast::pat::{IdPat, Pat};
    match *expr.stx {
      Expr::Id(id) => {
        let loc = id.loc;
        let name = id.stx.name;
        Ok(Node::new(loc, Pat::Id(Node::new(loc, IdPat { name }))))
      }
      _ => Err(expr.loc.error(SyntaxErrorType::InvalidAssigmentTarget, None)),
    }
  }

  pub fn var_decl(&mut self, export: bool) -> SyntaxResult<Node<VarDecl>> {
    let start = self.peek().loc;
    let mode = match self.consume().typ {
      TT::KeywordVar => VarDeclMode::Var,
      TT::KeywordLet => VarDeclMode::Let,
      TT::KeywordConst => VarDeclMode::Const,
      _ => return Err(start.error(SyntaxErrorType::ExpectedSyntax("declaration keyword"), None)),
    };
    let first = self.pat_decl()?;
    let decl = self.var_decl_tail(export, mode, start, first)?;
    self.eat_semicolon()?;
    Ok(decl)
  }

  fn var_decl_tail(
    &mut self,
    export: bool,
    mode: VarDeclMode,
    start: crate::loc::Loc,
    first_pattern: Node<crate::ast::decl::PatDecl>,
  ) -> SyntaxResult<Node<VarDecl>> {
    let mut declarators = Vec::new();
    let mut pattern = first_pattern;
    loop {
      let initializer = self.consume_if(TT::Equals).and_then(self, |p| p.assign_expr())?;
      declarators.push(VarDeclarator {
        pattern,
        initializer,
      });
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
      pattern = self.pat_decl()?;
    }
    let loc = crate::loc::Loc(start.0, self.last_consumed_end);
    Ok(Node::new(loc, VarDecl {
      export,
      mode,
      declarators,
    }))
  }

  pub fn func_decl(&mut self, export: bool, export_default: bool) -> SyntaxResult<Node<FuncDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFunction)?;
      let name = if p.peek_typ().is_identifier_like() {
        Some(p.class_or_func_name()?)
      } else {
        None
      };
      let function = p.func_from_parameters()?;
      Ok(FuncDecl {
        export,
        export_default,
        name,
        function,
      })
    })
  }

  pub fn class_decl(&mut self, export: bool, export_default: bool) -> SyntaxResult<Node<ClassDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name = if p.peek_typ().is_identifier_like() {
        Some(p.class_or_func_name()?)
      } else {
        None
      };
      let extends = p
        .consume_if(TT::KeywordExtends)
        .and_then(p, |p| p.expr())?;
      let members = p.class_members()?;
      Ok(ClassDecl {
        export,
        export_default,
        name,
        extends,
        members,
      })
    })
  }
}
