use crate::ast::decl::PatDecl;
use crate::ast::import_export::{ExportName, ExportNames, ImportName, ImportNames};
use crate::ast::node::Node;
use crate::ast::pat::IdPat;
use crate::ast::stmt::{ExportDefaultExprStmt, ExportListStmt, ImportStmt, Stmt};
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

use super::Parser;

impl<'a> Parser<'a> {
  /// Parses `target`, `target as alias`, `default as alias`,
  /// `"target" as alias`. For exports, `default` can be used without an
  /// alias; for imports it requires one.
  fn import_or_export_name(&mut self, is_export: bool) -> SyntaxResult<(String, Node<IdPat>)> {
    let t0 = self.peek();
    let (target, alias_is_required) = match t0.typ {
      TT::LiteralString => {
        let raw = self.consume_as_string();
        (super::expr::normalise_literal_string(&raw), true)
      }
      t if t.is_identifier_like() => (self.consume_as_string(), false),
      // `default` is special: exports may use it without an alias, imports
      // may not.
      TT::KeywordDefault if is_export => (self.consume_as_string(), false),
      // Any other keyword is allowed, but being reserved it needs an alias.
      t if t.keyword_str().is_some() => (self.consume_as_string(), true),
      _ => return Err(t0.error(SyntaxErrorType::ExpectedNotFound)),
    };
    let alias = if self.consume_if(TT::KeywordAs).is_match() {
      let t_alias = self.peek();
      if is_export && t_alias.typ == TT::KeywordDefault {
        // `export {a as default}` is legal.
        self.consume();
        Node::new(t_alias.loc, IdPat {
          name: "default".to_string(),
        })
      } else {
        self.id_pat()?
      }
    } else if alias_is_required {
      return Err(t0.error(SyntaxErrorType::ExpectedNotFound));
    } else {
      // A "virtual" node representing the alias as if `a as a` was written.
      Node::new(t0.loc, IdPat {
        name: target.clone(),
      })
    };
    Ok((target, alias))
  }

  fn module_specifier(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    let raw = self.string(t.loc);
    Ok(super::expr::normalise_literal_string(&raw))
  }

  /// Parses an import statement like:
  /// - `import "module"`
  /// - `import * as b from "module"`
  /// - `import {"b" as c, d, e as f, default as g} from "module"`
  /// - `import a from "module"`
  /// - `import a, * as b from "module"`
  /// - `import a, {b as c} from "module"`
  pub fn import_stmt(&mut self) -> SyntaxResult<Node<ImportStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      let (default, can_have_names) = if p.peek_typ().is_identifier_like() {
        let alias = p.id_pat_decl()?;
        (Some(alias), p.consume_if(TT::Comma).is_match())
      } else {
        (None, true)
      };
      let names = if !can_have_names {
        None
      } else if p.consume_if(TT::Asterisk).is_match() {
        p.require(TT::KeywordAs)?;
        let alias = p.id_pat_decl()?;
        Some(ImportNames::All(alias))
      } else if p.peek_typ() == TT::BraceOpen {
        p.require(TT::BraceOpen)?;
        let names = p.list(TT::Comma, TT::BraceClose, |p| {
          p.with_loc(|p| {
            let (target, alias) = p.import_or_export_name(false)?;
            let alias = alias.into_wrapped().wrap(|pat| PatDecl { pat });
            Ok(ImportName {
              importable: target,
              alias,
            })
          })
        })?;
        Some(ImportNames::Specific(names))
      } else {
        // Side-effect only import like `import "foo"`.
        None
      };
      if default.is_some() || names.is_some() {
        p.require(TT::KeywordFrom)?;
      }
      let module = p.module_specifier()?;
      p.eat_semicolon()?;
      Ok(ImportStmt {
        default,
        names,
        module,
      })
    })
  }

  fn export_list_stmt(&mut self) -> SyntaxResult<Node<ExportListStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      let t = p.consume();
      let stmt = match t.typ {
        TT::BraceOpen => {
          let names = p.list(TT::Comma, TT::BraceClose, |p| {
            p.with_loc(|p| {
              let (target, alias) = p.import_or_export_name(true)?;
              Ok(ExportName {
                exportable: target,
                alias,
              })
            })
          })?;
          let from = p
            .consume_if(TT::KeywordFrom)
            .and_then(p, |p| p.module_specifier())?;
          ExportListStmt {
            names: ExportNames::Specific(names),
            from,
          }
        }
        TT::Asterisk => {
          let alias = p.consume_if(TT::KeywordAs).and_then(p, |p| p.id_pat())?;
          p.require(TT::KeywordFrom)?;
          let from = p.module_specifier()?;
          ExportListStmt {
            names: ExportNames::All(alias),
            from: Some(from),
          }
        }
        _ => return Err(t.error(SyntaxErrorType::ExpectedNotFound)),
      };
      p.eat_semicolon()?;
      Ok(stmt)
    })
  }

  fn export_default_expr_stmt(&mut self) -> SyntaxResult<Node<ExportDefaultExprStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      p.require(TT::KeywordDefault)?;
      let expression = p.expr()?;
      p.eat_semicolon()?;
      Ok(ExportDefaultExprStmt { expression })
    })
  }

  // https://tc39.es/ecma262/#sec-exports
  pub fn export_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let t1 = self.peek_at(1);
    let t2 = self.peek_at(2);
    debug_assert_eq!(self.peek_typ(), TT::KeywordExport);
    // `class` and `function` are hoisted statements, not expressions, even
    // when unnamed under `export default`.
    let stmt: Node<Stmt> = match (t1, t2) {
      (TT::KeywordDefault, TT::KeywordFunction) => {
        self.consume();
        self.consume();
        self.func_decl(false, true)?.into_wrapped()
      }
      (TT::KeywordDefault, TT::KeywordClass) => {
        self.consume();
        self.consume();
        self.class_decl(false, true)?.into_wrapped()
      }
      (TT::KeywordDefault, _) => self.export_default_expr_stmt()?.into_wrapped(),
      (TT::KeywordFunction, _) => {
        self.consume();
        self.func_decl(true, false)?.into_wrapped()
      }
      (TT::KeywordClass, _) => {
        self.consume();
        self.class_decl(true, false)?.into_wrapped()
      }
      (TT::KeywordVar | TT::KeywordLet | TT::KeywordConst, _) => {
        self.consume();
        self.var_decl(true)?.into_wrapped()
      }
      (TT::BraceOpen | TT::Asterisk, _) => self.export_list_stmt()?.into_wrapped(),
      _ => {
        return Err(
          self
            .peek()
            .error(SyntaxErrorType::ExpectedSyntax("exportable")),
        )
      }
    };
    Ok(stmt)
  }
}
