//! # ipld-cid
//!
//! Self-describing content identifiers. A CID names a block of data by the
//! triple `(version, codec, multihash)` and has a binary and a textual form.
//!
//! ```
//! use ipld_cid::{ContentId, Prefix};
//!
//! let cid = Prefix::v0().sum(b"hello world").unwrap();
//! assert_eq!(cid.encode(), "QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4");
//! let parsed = ipld_cid::from_str(&cid.to_v1().encode()).unwrap();
//! assert_eq!(parsed.to_v0().unwrap(), cid);
//! ```
#![deny(
  clippy::missing_errors_doc,
  clippy::missing_panics_doc,
  clippy::missing_safety_doc
)]

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
#[cfg(test)]
extern crate rand;

pub mod base;
pub mod builder;
pub mod cid;
pub mod codec;
pub mod error;
pub mod multihash;
pub mod parse;
pub mod prefix;
pub mod set;
pub mod varint;
pub mod version;

#[cfg(any(test, feature = "arb"))]
mod arb;
#[cfg(feature = "json")]
pub mod json;

pub use builder::{
  Builder,
  V0Builder,
  V1Builder,
};
pub use cid::{
  Cid,
  CidV0,
  CidV1,
  ContentId,
};
pub use codec::Codec;
pub use error::{
  Error,
  Result,
};
pub use parse::{
  extract_encoding,
  from_bytes,
  from_bytes_strict,
  from_reader,
  from_str,
  is_cid,
  must_parse,
  parse_ipfs_path,
};
pub use prefix::Prefix;
pub use set::CidSet;
pub use version::Version;
