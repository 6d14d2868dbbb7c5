//! A set of CIDs keyed on their `(version, codec, multihash)` triple.
//!
//! The set has no internal locking; share it behind a `Mutex` or keep a single
//! owner when several threads mark nodes.

use std::collections::{
  hash_set,
  HashSet,
};

use crate::cid::Cid;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CidSet(HashSet<Cid>);

impl CidSet {
  pub fn new() -> Self { Self::default() }

  pub fn add(&mut self, cid: Cid) { self.0.insert(cid); }

  pub fn has(&self, cid: &Cid) -> bool { self.0.contains(cid) }

  /// Alias of [`CidSet::has`].
  pub fn contains(&self, cid: &Cid) -> bool { self.has(cid) }

  /// Removes `cid` if present.
  pub fn remove(&mut self, cid: &Cid) { self.0.remove(cid); }

  /// Adds `cid` if it is not already present and returns whether it was
  /// newly inserted.
  pub fn visit(&mut self, cid: Cid) -> bool { self.0.insert(cid) }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Every CID in the set, in no particular order.
  pub fn keys(&self) -> Vec<Cid> { self.0.iter().cloned().collect() }

  pub fn for_each<F: FnMut(&Cid)>(&self, f: F) { self.0.iter().for_each(f) }

  pub fn iter(&self) -> hash_set::Iter<'_, Cid> { self.0.iter() }
}

impl Extend<Cid> for CidSet {
  fn extend<I: IntoIterator<Item = Cid>>(&mut self, iter: I) {
    self.0.extend(iter)
  }
}

impl core::iter::FromIterator<Cid> for CidSet {
  fn from_iter<I: IntoIterator<Item = Cid>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl IntoIterator for CidSet {
  type IntoIter = hash_set::IntoIter<Cid>;
  type Item = Cid;

  fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a CidSet {
  type IntoIter = hash_set::Iter<'a, Cid>;
  type Item = &'a Cid;

  fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::{
    cid::tests::hello_hash,
    codec::Codec,
  };

  fn fixtures() -> (Cid, Cid) {
    let v0 = Cid::new_v0(hello_hash()).unwrap();
    let v1 = Cid::new_v1(Codec::RAW, hello_hash()).unwrap();
    (v0, v1)
  }

  #[test]
  fn add_has_remove() {
    let (v0, v1) = fixtures();
    let mut set = CidSet::new();
    assert!(set.is_empty());
    set.add(v0.clone());
    set.add(v0.clone());
    assert_eq!(set.len(), 1);
    assert!(set.has(&v0));
    assert!(!set.contains(&v1));
    set.remove(&v1);
    assert_eq!(set.len(), 1);
    set.remove(&v0);
    assert!(set.is_empty());
  }

  #[test]
  fn value_equality() {
    let (v0, _) = fixtures();
    let mut set = CidSet::new();
    set.add(v0.clone());
    let same: Cid = "QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4".parse().unwrap();
    assert!(set.has(&same));
    assert!(!set.has(&v0.to_v1()));
  }

  #[test]
  fn visit_reports_first_insertion() {
    let (v0, v1) = fixtures();
    let mut set = CidSet::new();
    assert!(set.visit(v0.clone()));
    assert!(!set.visit(v0.clone()));
    assert!(set.visit(v1.clone()));
    assert_eq!(set.len(), 2);
  }

  #[test]
  fn enumeration() {
    let (v0, v1) = fixtures();
    let set: CidSet = vec![v0.clone(), v1.clone(), v0.clone()].into_iter().collect();
    let keys = set.keys();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&v0) && keys.contains(&v1));
    let mut seen = Vec::new();
    set.for_each(|cid| seen.push(cid.clone()));
    assert_eq!(seen.len(), 2);
    assert_eq!((&set).into_iter().count(), 2);
    let mut other = CidSet::new();
    other.extend(set.clone());
    assert_eq!(other, set);
    assert_eq!(set.into_iter().count(), 2);
  }

  #[quickcheck]
  fn visit_is_idempotent(cids: Vec<Cid>) -> bool {
    let mut set = CidSet::new();
    let mut distinct = std::collections::HashSet::new();
    for cid in cids {
      let first = distinct.insert(cid.clone());
      if set.visit(cid.clone()) != first || set.visit(cid) {
        return false;
      }
    }
    set.len() == distinct.len()
  }
}
