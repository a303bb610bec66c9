use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::decl::PatDecl;
use super::node::Node;
use super::pat::IdPat;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportName {
  // The name exported by the requested module. `default` is still a name.
  #[drive(skip)]
  pub importable: String,
  // Always set, even when no explicit alias is provided, so downstream
  // passes always have a declaring pattern to inspect. PatDecl always
  // contains IdPat.
  pub alias: Node<PatDecl>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ImportNames {
  // `import * as name from "module"`. PatDecl always contains IdPat.
  All(Node<PatDecl>),
  // `import {a as b, c, default as e} from "module"`
  Specific(Vec<Node<ImportName>>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportName {
  // The local (or imported) name being exported.
  #[drive(skip)]
  pub exportable: String,
  // Always set, even when no explicit alias is provided.
  pub alias: Node<IdPat>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ExportNames {
  // `export * from "module"`
  // `export * as name from "module"`
  All(Option<Node<IdPat>>),
  // `export {a as default, b as c, d}`
  // `export {default, a as b, c} from "module"`
  Specific(Vec<Node<ExportName>>),
}
