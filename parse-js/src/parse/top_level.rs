use crate::ast::node::Node;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

use super::Parser;

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    // A leading doc comment containing `@fileoverview` documents the file,
    // not the first statement.
    let has_overview = self
      .peek_doc()
      .is_some_and(|doc| doc.text.contains("@fileoverview"));
    let file_doc = if has_overview { self.take_doc() } else { None };
    let start = self.peek().loc.0;
    let mut body = Vec::new();
    while self.peek_typ() != TT::EOF {
      body.push(self.stmt()?);
    }
    let end = self.last_consumed_end.max(start);
    let mut top = Node::new(Loc(start, end), TopLevel { body });
    if let Some(doc) = file_doc {
      top.assoc.set(doc);
    }
    Ok(top)
  }
}
