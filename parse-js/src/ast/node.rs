use crate::loc::Loc;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::any::Any;
use std::any::TypeId;
use std::fmt::{self, Debug, Formatter};

/// Type-keyed side storage attached to every node. Passes use it to record
/// facts (doc comments, original names, call flags) without widening the
/// syntax types themselves.
#[derive(Default, Drive, DriveMut)]
pub struct NodeAssocData {
  // Values are bounded by Send + Sync so trees stay movable across threads.
  #[drive(skip)]
  items: SmallVec<[(TypeId, Box<dyn Any + Send + Sync>); 1]>,
}

impl NodeAssocData {
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn get<T: Any>(&self) -> Option<&T> {
    let t = TypeId::of::<T>();
    self
      .items
      .iter()
      .find(|(id, _)| *id == t)
      .map(|(_, v)| v.downcast_ref().unwrap())
  }

  pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
    let t = TypeId::of::<T>();
    self
      .items
      .iter_mut()
      .find(|(id, _)| *id == t)
      .map(|(_, v)| v.downcast_mut().unwrap())
  }

  pub fn set<T: Any + Send + Sync>(&mut self, v: T) {
    let t = TypeId::of::<T>();
    if let Some((_, existing)) = self.items.iter_mut().find(|(id, _)| *id == t) {
      *existing = Box::new(v);
    } else {
      self.items.push((t, Box::new(v)));
    }
  }

  pub fn remove<T: Any>(&mut self) -> Option<T> {
    let t = TypeId::of::<T>();
    self.items.iter().position(|(id, _)| *id == t).map(|idx| {
      let (_, v) = self.items.remove(idx);
      *v.downcast::<T>().unwrap()
    })
  }
}

/// Marker recording the source-level name an identifier had before renaming,
/// for source maps and debugging output.
#[derive(Clone, Debug)]
pub struct OriginalName(pub String);

/// Marker attached to a call expression whose callee was rewritten from a
/// module namespace property access; such calls must not receive an implicit
/// `this` binding.
#[derive(Clone, Copy, Debug)]
pub struct FreeCall;

#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  // Locations are best-effort: rewrites create nodes that have no exact
  // source counterpart, in which case the location refers to whatever the
  // node was derived from.
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
  pub assoc: NodeAssocData,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      assoc: NodeAssocData::default(),
    }
  }

  /// Converts this node's stx into a different type, keeping the same
  /// location and associated data. Useful for converting S into a variant
  /// E::S(S) on an enum where an E is wanted.
  pub fn into_stx<T: From<S> + Drive + DriveMut>(self) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(T::from(*self.stx)),
      assoc: self.assoc,
    }
  }

  /// Moves Node<S> into Node<T { Node<S> }>. The wrapper keeps the location
  /// but carries no associated data of its own.
  pub fn into_wrapped<T: From<Node<S>> + Drive + DriveMut>(self) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(T::from(self)),
      assoc: NodeAssocData::default(),
    }
  }

  /// Wraps the node inside another node with the same loc, with syntax
  /// derived from the provided callback.
  pub fn wrap<T: Drive + DriveMut, F: FnOnce(Node<S>) -> T>(self, f: F) -> Node<T> {
    let loc = self.loc;
    let stx = f(self);
    Node::new(loc, stx)
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}
