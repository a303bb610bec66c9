use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::DocComment;
use crate::lex::Lexed;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

pub mod expr;
pub mod func;
pub mod import_export;
pub mod pat;
pub mod stmt;
pub mod top_level;

#[cfg(test)]
mod tests;

/// Recursive-descent parser over an eagerly lexed token stream.
///
/// The token buffer always ends with [`TT::EOF`], so lookahead never has to
/// handle absence. Methods are spread across the submodules of this module,
/// each extending `impl Parser` with the productions it owns.
pub struct Parser<'a> {
  source: &'a str,
  tokens: Vec<Token>,
  docs: Vec<DocComment>,
  next: usize,
  last_consumed_end: usize,
}

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }

  pub fn and_then<R, F: FnOnce(&mut Parser<'_>) -> SyntaxResult<R>>(
    self,
    p: &mut Parser<'_>,
    f: F,
  ) -> SyntaxResult<Option<R>> {
    Ok(if self.matched { Some(f(p)?) } else { None })
  }
}

impl<'a> Parser<'a> {
  pub fn new(source: &'a str, lexed: Lexed) -> Parser<'a> {
    Parser {
      source,
      tokens: lexed.tokens,
      docs: lexed.docs,
      next: 0,
      last_consumed_end: 0,
    }
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.source[loc.0..loc.1]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn peek(&self) -> Token {
    self.tokens[self.next].clone()
  }

  pub fn peek_typ(&self) -> TT {
    self.tokens[self.next].typ
  }

  pub fn peek_at(&self, offset: usize) -> TT {
    self
      .tokens
      .get(self.next + offset)
      .map(|t| t.typ)
      .unwrap_or(TT::EOF)
  }

  pub fn consume(&mut self) -> Token {
    let t = self.tokens[self.next].clone();
    if t.typ != TT::EOF {
      self.next += 1;
      self.last_consumed_end = t.loc.1;
    }
    t
  }

  /// Consumes the next token regardless of type, returning its raw source
  /// text.
  pub fn consume_as_string(&mut self) -> String {
    let loc = self.consume().loc;
    self.string(loc)
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    let t = &self.tokens[self.next];
    let matched = t.typ == typ;
    let result = MaybeToken {
      typ: t.typ,
      loc: t.loc,
      matched,
    };
    if matched {
      self.consume();
    }
    result
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    let t = self.consume();
    if t.typ != typ {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    } else {
      Ok(t)
    }
  }

  /// Requires and consumes a binding identifier, allowing contextual
  /// keywords.
  pub fn require_identifier(&mut self) -> SyntaxResult<Token> {
    let t = self.consume();
    if !t.typ.is_identifier_like() {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
    }
    Ok(t)
  }

  /// Requires a property name (after `.`, or a non-computed key); any keyword
  /// is acceptable there.
  pub fn require_property_name(&mut self) -> SyntaxResult<Token> {
    let t = self.consume();
    if !t.typ.is_property_name() {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("property name")));
    }
    Ok(t)
  }

  /// Takes the doc comment attached to the next token, if any. Callers take
  /// it at statement/member start so the comment travels with the parsed
  /// node.
  pub fn take_doc(&mut self) -> Option<DocComment> {
    let idx = self.tokens[self.next].doc.take()?;
    Some(self.docs[idx].clone())
  }

  /// Peeks at the doc comment attached to the next token without detaching
  /// it.
  pub fn peek_doc(&self) -> Option<&DocComment> {
    let idx = self.tokens[self.next].doc?;
    Some(&self.docs[idx])
  }

  /// Automatic semicolon insertion: a statement ends at `;`, or virtually
  /// before `}`, at EOF, or at a line break.
  pub fn eat_semicolon(&mut self) -> SyntaxResult<()> {
    let t = &self.tokens[self.next];
    if t.typ == TT::Semicolon {
      self.consume();
      Ok(())
    } else if t.typ == TT::EOF || t.typ == TT::BraceClose || t.preceded_by_line_terminator {
      Ok(())
    } else {
      Err(
        t.loc
          .error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon), Some(t.typ)),
      )
    }
  }

  /// Runs `f` and returns its result wrapped in the source range it consumed.
  pub fn with_loc<T, F>(&mut self, f: F) -> SyntaxResult<crate::ast::node::Node<T>>
  where
    T: derive_visitor::Drive + derive_visitor::DriveMut,
    F: FnOnce(&mut Self) -> SyntaxResult<T>,
  {
    let start = self.tokens[self.next].loc.0;
    let stx = f(self)?;
    let end = self.last_consumed_end.max(start);
    Ok(crate::ast::node::Node::new(Loc(start, end), stx))
  }

  /// Parses a `sep`-delimited list terminated by `end`, with an optional
  /// trailing separator. Consumes the terminator.
  pub fn list<T, F>(&mut self, sep: TT, end: TT, mut f: F) -> SyntaxResult<Vec<T>>
  where
    F: FnMut(&mut Self) -> SyntaxResult<T>,
  {
    let mut items = Vec::new();
    loop {
      if self.consume_if(end).is_match() {
        break;
      }
      items.push(f(self)?);
      if !self.consume_if(sep).is_match() {
        self.require(end)?;
        break;
      }
    }
    Ok(items)
  }
}
