use std::io;

use thiserror::Error;

/// Type alias to use this library's [`Error`] type in a `Result`.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
  #[error("input too short")]
  TooShort,
  #[error("decoded cid length {0} is invalid")]
  InvalidCidLength(usize),
  #[error("multihash is not a valid base58 encoded multihash")]
  InvalidBase58Multihash,
  #[error("invalid multihash: {0}")]
  InvalidMultihashStructure(String),
  #[error("invalid cid version {0}, expected 0 or 1")]
  InvalidVersion(u64),
  #[error("unknown codec {0}")]
  UnknownCodec(String),
  #[error("codec {0} is not allowed for cid version 0")]
  CodecVersionMismatch(String),
  #[error("unknown multibase encoding {0}")]
  UnknownEncoding(String),
  #[error("invalid multibase payload: {0}")]
  InvalidMultibase(#[from] multibase::Error),
  #[error("hash algorithm {0} is not supported")]
  UnsupportedHashAlgorithm(String),
  #[error("unknown multihash type {0}")]
  UnknownHashType(String),
  #[error("unknown multihash code {0:#x}")]
  UnknownHashCode(u64),
  #[error("requested digest length {requested} exceeds the {available} bytes produced")]
  InvalidDigestLength { requested: usize, available: usize },
  #[error("malformed varint: {0}")]
  MalformedVarint(#[from] unsigned_varint::decode::Error),
  #[error("trailing bytes: expected {expected} bytes, found {actual}")]
  TrailingBytes { expected: usize, actual: usize },
  #[error("unexpected end of input")]
  UnexpectedEof,
  #[error("read failed: {0}")]
  Io(#[source] io::Error),
  #[error("invalid IPLD JSON link: {0}")]
  InvalidIpldJson(String),
  #[error("failed to parse cid: {0}")]
  ParseFailed(#[source] Box<Error>),
}

impl From<io::Error> for Error {
  fn from(err: io::Error) -> Self {
    if err.kind() == io::ErrorKind::UnexpectedEof {
      Self::UnexpectedEof
    }
    else {
      Self::Io(err)
    }
  }
}
