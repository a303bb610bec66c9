use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use once_cell::sync::Lazy;

pub static KEYWORDS_MAPPING: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  [
    ("as", TT::KeywordAs),
    ("break", TT::KeywordBreak),
    ("catch", TT::KeywordCatch),
    ("class", TT::KeywordClass),
    ("const", TT::KeywordConst),
    ("continue", TT::KeywordContinue),
    ("debugger", TT::KeywordDebugger),
    ("default", TT::KeywordDefault),
    ("delete", TT::KeywordDelete),
    ("do", TT::KeywordDo),
    ("else", TT::KeywordElse),
    ("export", TT::KeywordExport),
    ("extends", TT::KeywordExtends),
    ("false", TT::KeywordFalse),
    ("finally", TT::KeywordFinally),
    ("for", TT::KeywordFor),
    ("from", TT::KeywordFrom),
    ("function", TT::KeywordFunction),
    ("if", TT::KeywordIf),
    ("import", TT::KeywordImport),
    ("in", TT::KeywordIn),
    ("instanceof", TT::KeywordInstanceof),
    ("let", TT::KeywordLet),
    ("new", TT::KeywordNew),
    ("null", TT::KeywordNull),
    ("of", TT::KeywordOf),
    ("return", TT::KeywordReturn),
    ("static", TT::KeywordStatic),
    ("this", TT::KeywordThis),
    ("throw", TT::KeywordThrow),
    ("true", TT::KeywordTrue),
    ("try", TT::KeywordTry),
    ("typeof", TT::KeywordTypeof),
    ("var", TT::KeywordVar),
    ("void", TT::KeywordVoid),
    ("while", TT::KeywordWhile),
  ]
  .into_iter()
  .collect()
});

/// A `/** ... */` comment captured during lexing. `text` is the content
/// between the delimiters, untouched.
///
/// The parser attaches the comment to the statement (or class member, or
/// file root) that follows it, via `NodeAssocData`; read it back with
/// [`doc_comment`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocComment {
  pub text: String,
  pub loc: Loc,
}

/// Returns the doc comment attached to a node, if any.
pub fn doc_comment(assoc: &crate::ast::node::NodeAssocData) -> Option<&DocComment> {
  assoc.get::<DocComment>()
}

/// The fully lexed form of one source file. Tokens are produced eagerly; the
/// final token is always [`TT::EOF`].
pub struct Lexed {
  pub tokens: Vec<Token>,
  pub docs: Vec<DocComment>,
}

fn is_id_start(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_id_continue(c: u8) -> bool {
  c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

pub fn lex(source: &str) -> SyntaxResult<Lexed> {
  Lexer::new(source).run()
}

struct Lexer<'a> {
  source: &'a [u8],
  pos: usize,
  tokens: Vec<Token>,
  docs: Vec<DocComment>,
  line_terminator: bool,
  pending_doc: Option<usize>,
}

impl<'a> Lexer<'a> {
  fn new(source: &'a str) -> Self {
    Lexer {
      source: source.as_bytes(),
      pos: 0,
      tokens: Vec::new(),
      docs: Vec::new(),
      line_terminator: false,
      pending_doc: None,
    }
  }

  fn peek(&self) -> Option<u8> {
    self.source.get(self.pos).copied()
  }

  fn peek_at(&self, offset: usize) -> Option<u8> {
    self.source.get(self.pos + offset).copied()
  }

  fn run(mut self) -> SyntaxResult<Lexed> {
    loop {
      self.skip_trivia()?;
      let start = self.pos;
      let Some(c) = self.peek() else {
        self.push(TT::EOF, start);
        return Ok(Lexed {
          tokens: self.tokens,
          docs: self.docs,
        });
      };
      if is_id_start(c) {
        self.pos += 1;
        while self.peek().is_some_and(is_id_continue) {
          self.pos += 1;
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap();
        let typ = KEYWORDS_MAPPING
          .get(text)
          .copied()
          .unwrap_or(TT::Identifier);
        self.push(typ, start);
      } else if c.is_ascii_digit() || (c == b'.' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit()))
      {
        self.lex_number(start)?;
      } else if c == b'"' || c == b'\'' {
        self.lex_string(start)?;
      } else {
        self.lex_punctuator(start)?;
      }
    }
  }

  fn skip_trivia(&mut self) -> SyntaxResult<()> {
    loop {
      match self.peek() {
        Some(b' ') | Some(b'\t') | Some(b'\r') => self.pos += 1,
        Some(b'\n') => {
          self.line_terminator = true;
          self.pos += 1;
        }
        Some(b'/') if self.peek_at(1) == Some(b'/') => {
          while self.peek().is_some_and(|c| c != b'\n') {
            self.pos += 1;
          }
        }
        Some(b'/') if self.peek_at(1) == Some(b'*') => {
          let start = self.pos;
          let is_doc = self.peek_at(2) == Some(b'*') && self.peek_at(3) != Some(b'/');
          self.pos += 2;
          let body_start = if is_doc { self.pos + 1 } else { self.pos };
          loop {
            match self.peek() {
              None => return Err(Loc(start, self.pos).error(SyntaxErrorType::UnexpectedEnd, None)),
              Some(b'*') if self.peek_at(1) == Some(b'/') => break,
              Some(b'\n') => {
                self.line_terminator = true;
                self.pos += 1;
              }
              Some(_) => self.pos += 1,
            }
          }
          let body_end = self.pos;
          self.pos += 2;
          if is_doc {
            let text = std::str::from_utf8(&self.source[body_start..body_end])
              .unwrap()
              .to_string();
            self.docs.push(DocComment {
              text,
              loc: Loc(start, self.pos),
            });
            self.pending_doc = Some(self.docs.len() - 1);
          }
        }
        _ => return Ok(()),
      }
    }
  }

  fn push(&mut self, typ: TT, start: usize) {
    self.tokens.push(Token {
      typ,
      loc: Loc(start, self.pos),
      preceded_by_line_terminator: self.line_terminator,
      doc: self.pending_doc.take(),
    });
    self.line_terminator = false;
  }

  fn lex_number(&mut self, start: usize) -> SyntaxResult<()> {
    if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x') | Some(b'X')) {
      self.pos += 2;
      if !self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
        return Err(Loc(start, self.pos).error(SyntaxErrorType::MalformedLiteralNumber, None));
      }
      while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
        self.pos += 1;
      }
    } else {
      while self.peek().is_some_and(|c| c.is_ascii_digit()) {
        self.pos += 1;
      }
      if self.peek() == Some(b'.') {
        self.pos += 1;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
          self.pos += 1;
        }
      }
      if matches!(self.peek(), Some(b'e') | Some(b'E')) {
        self.pos += 1;
        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
          self.pos += 1;
        }
        if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
          return Err(Loc(start, self.pos).error(SyntaxErrorType::MalformedLiteralNumber, None));
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
          self.pos += 1;
        }
      }
    }
    if self.peek().is_some_and(is_id_start) {
      return Err(Loc(start, self.pos + 1).error(SyntaxErrorType::MalformedLiteralNumber, None));
    }
    self.push(TT::LiteralNumber, start);
    Ok(())
  }

  fn lex_string(&mut self, start: usize) -> SyntaxResult<()> {
    let quote = self.peek().unwrap();
    self.pos += 1;
    loop {
      match self.peek() {
        None => return Err(Loc(start, self.pos).error(SyntaxErrorType::UnexpectedEnd, None)),
        Some(b'\n') => {
          return Err(Loc(start, self.pos).error(SyntaxErrorType::LineTerminatorInString, None))
        }
        Some(b'\\') => {
          self.pos += 2;
        }
        Some(c) if c == quote => {
          self.pos += 1;
          break;
        }
        Some(_) => self.pos += 1,
      }
    }
    self.push(TT::LiteralString, start);
    Ok(())
  }

  fn lex_punctuator(&mut self, start: usize) -> SyntaxResult<()> {
    let rest = &self.source[self.pos..];
    // Longest match first.
    static PUNCTUATORS: &[(&[u8], TT)] = &[
      (b">>>", TT::ChevronRightChevronRightChevronRight),
      (b"...", TT::DotDotDot),
      (b"===", TT::EqualsEqualsEquals),
      (b"!==", TT::ExclamationEqualsEquals),
      (b"&&", TT::AmpersandAmpersand),
      (b"||", TT::BarBar),
      (b"??", TT::QuestionQuestion),
      (b"<<", TT::ChevronLeftChevronLeft),
      (b">>", TT::ChevronRightChevronRight),
      (b"<=", TT::ChevronLeftEquals),
      (b">=", TT::ChevronRightEquals),
      (b"==", TT::EqualsEquals),
      (b"!=", TT::ExclamationEquals),
      (b"=>", TT::EqualsChevronRight),
      (b"+=", TT::PlusEquals),
      (b"-=", TT::HyphenEquals),
      (b"*=", TT::AsteriskEquals),
      (b"/=", TT::SlashEquals),
      (b"%=", TT::PercentEquals),
      (b"++", TT::PlusPlus),
      (b"--", TT::HyphenHyphen),
      (b"&", TT::Ampersand),
      (b"*", TT::Asterisk),
      (b"|", TT::Bar),
      (b"}", TT::BraceClose),
      (b"{", TT::BraceOpen),
      (b"]", TT::BracketClose),
      (b"[", TT::BracketOpen),
      (b"^", TT::Caret),
      (b"<", TT::ChevronLeft),
      (b">", TT::ChevronRight),
      (b":", TT::Colon),
      (b",", TT::Comma),
      (b".", TT::Dot),
      (b"=", TT::Equals),
      (b"!", TT::Exclamation),
      (b"-", TT::Hyphen),
      (b")", TT::ParenthesisClose),
      (b"(", TT::ParenthesisOpen),
      (b"%", TT::Percent),
      (b"+", TT::Plus),
      (b"?", TT::Question),
      (b";", TT::Semicolon),
      (b"/", TT::Slash),
      (b"~", TT::Tilde),
    ];
    for (text, typ) in PUNCTUATORS {
      if rest.starts_with(text) {
        self.pos += text.len();
        self.push(*typ, start);
        return Ok(());
      }
    }
    let c = rest[0] as char;
    Err(Loc(start, start + 1).error(SyntaxErrorType::UnexpectedChar(c), None))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn types(source: &str) -> Vec<TT> {
    lex(source)
      .unwrap()
      .tokens
      .into_iter()
      .map(|t| t.typ)
      .collect()
  }

  #[test]
  fn lexes_declaration() {
    assert_eq!(types("var a = 1;"), vec![
      TT::KeywordVar,
      TT::Identifier,
      TT::Equals,
      TT::LiteralNumber,
      TT::Semicolon,
      TT::EOF,
    ]);
  }

  #[test]
  fn distinguishes_multi_char_punctuators() {
    assert_eq!(types("a >>> b >> c > d"), vec![
      TT::Identifier,
      TT::ChevronRightChevronRightChevronRight,
      TT::Identifier,
      TT::ChevronRightChevronRight,
      TT::Identifier,
      TT::ChevronRight,
      TT::Identifier,
      TT::EOF,
    ]);
  }

  #[test]
  fn records_line_terminators() {
    let lexed = lex("a\nb c").unwrap();
    assert!(!lexed.tokens[0].preceded_by_line_terminator);
    assert!(lexed.tokens[1].preceded_by_line_terminator);
    assert!(!lexed.tokens[2].preceded_by_line_terminator);
  }

  #[test]
  fn captures_doc_comments() {
    let lexed = lex("/** @type {number} */ var x;").unwrap();
    let doc = lexed.tokens[0].doc.expect("doc attached to `var`");
    assert_eq!(lexed.docs[doc].text, " @type {number} ");
    assert!(lexed.tokens[1].doc.is_none());
  }

  #[test]
  fn plain_block_comment_is_not_doc() {
    let lexed = lex("/* x */ var x;").unwrap();
    assert!(lexed.tokens[0].doc.is_none());
    assert!(lexed.docs.is_empty());
  }

  #[test]
  fn string_with_escapes() {
    let lexed = lex(r#"'a\'b' "c""#).unwrap();
    assert_eq!(lexed.tokens[0].typ, TT::LiteralString);
    assert_eq!(lexed.tokens[0].loc, Loc(0, 6));
    assert_eq!(lexed.tokens[1].typ, TT::LiteralString);
  }

  #[test]
  fn unterminated_string_errors() {
    assert!(lex("'abc").is_err());
    assert!(lex("'ab\ncd'").is_err());
  }

  #[test]
  fn hex_and_float_literals() {
    assert_eq!(types("0x1f 1.5e3 .25"), vec![
      TT::LiteralNumber,
      TT::LiteralNumber,
      TT::LiteralNumber,
      TT::EOF,
    ]);
    assert!(lex("0x").is_err());
    assert!(lex("1e").is_err());
  }
}
