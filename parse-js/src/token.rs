use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // Special token used to represent the end of the source code. Easier than
  // using and handling Option everywhere.
  EOF,

  Identifier,
  LiteralNumber,
  LiteralString,

  Ampersand,
  AmpersandAmpersand,
  Asterisk,
  AsteriskEquals,
  Bar,
  BarBar,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  Caret,
  ChevronLeft,
  ChevronLeftChevronLeft,
  ChevronLeftEquals,
  ChevronRight,
  ChevronRightChevronRight,
  ChevronRightChevronRightChevronRight,
  ChevronRightEquals,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  EqualsEquals,
  EqualsEqualsEquals,
  Exclamation,
  ExclamationEquals,
  ExclamationEqualsEquals,
  Hyphen,
  HyphenEquals,
  HyphenHyphen,
  ParenthesisClose,
  ParenthesisOpen,
  Percent,
  PercentEquals,
  Plus,
  PlusEquals,
  PlusPlus,
  Question,
  QuestionQuestion,
  Semicolon,
  Slash,
  SlashEquals,
  Tilde,

  KeywordAs,
  KeywordBreak,
  KeywordCatch,
  KeywordClass,
  KeywordConst,
  KeywordContinue,
  KeywordDebugger,
  KeywordDefault,
  KeywordDelete,
  KeywordDo,
  KeywordElse,
  KeywordExport,
  KeywordExtends,
  KeywordFalse,
  KeywordFinally,
  KeywordFor,
  KeywordFrom,
  KeywordFunction,
  KeywordIf,
  KeywordImport,
  KeywordIn,
  KeywordInstanceof,
  KeywordLet,
  KeywordNew,
  KeywordNull,
  KeywordOf,
  KeywordReturn,
  KeywordStatic,
  KeywordThis,
  KeywordThrow,
  KeywordTrue,
  KeywordTry,
  KeywordTypeof,
  KeywordVar,
  KeywordVoid,
  KeywordWhile,
}

impl TT {
  /// Whether this token may appear where a binding identifier is expected.
  /// Contextual keywords remain usable as plain names.
  pub fn is_identifier_like(self) -> bool {
    matches!(
      self,
      TT::Identifier | TT::KeywordAs | TT::KeywordFrom | TT::KeywordOf | TT::KeywordStatic
    )
  }

  /// Whether this token may appear after `.` or as a non-computed object key.
  pub fn is_property_name(self) -> bool {
    self == TT::Identifier || self.keyword_str().is_some()
  }

  /// The reserved source text of a keyword token.
  pub fn keyword_str(self) -> Option<&'static str> {
    Some(match self {
      TT::KeywordAs => "as",
      TT::KeywordBreak => "break",
      TT::KeywordCatch => "catch",
      TT::KeywordClass => "class",
      TT::KeywordConst => "const",
      TT::KeywordContinue => "continue",
      TT::KeywordDebugger => "debugger",
      TT::KeywordDefault => "default",
      TT::KeywordDelete => "delete",
      TT::KeywordDo => "do",
      TT::KeywordElse => "else",
      TT::KeywordExport => "export",
      TT::KeywordExtends => "extends",
      TT::KeywordFalse => "false",
      TT::KeywordFinally => "finally",
      TT::KeywordFor => "for",
      TT::KeywordFrom => "from",
      TT::KeywordFunction => "function",
      TT::KeywordIf => "if",
      TT::KeywordImport => "import",
      TT::KeywordIn => "in",
      TT::KeywordInstanceof => "instanceof",
      TT::KeywordLet => "let",
      TT::KeywordNew => "new",
      TT::KeywordNull => "null",
      TT::KeywordOf => "of",
      TT::KeywordReturn => "return",
      TT::KeywordStatic => "static",
      TT::KeywordThis => "this",
      TT::KeywordThrow => "throw",
      TT::KeywordTrue => "true",
      TT::KeywordTry => "try",
      TT::KeywordTypeof => "typeof",
      TT::KeywordVar => "var",
      TT::KeywordVoid => "void",
      TT::KeywordWhile => "while",
      _ => return None,
    })
  }
}

#[derive(Clone, Debug)]
pub struct Token {
  pub typ: TT,
  pub loc: Loc,
  pub preceded_by_line_terminator: bool,
  /// Index into the lexer's doc-comment table when a `/** ... */` comment
  /// immediately precedes this token.
  pub doc: Option<usize>,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    let actual = match self.typ {
      TT::EOF => None,
      t => Some(t),
    };
    self.loc.error(typ, actual)
  }
}
