//! Recovering CIDs from bytes, text, `/ipfs/` paths and streams.
//!
//! Untagged input may be framed in one of three ways, tried in this order:
//!
//! 1. multibase text, whose first byte is a registered multibase prefix and
//!    never `0x00`,
//! 2. a raw binary CID, whose first byte is the version `0x00` or `0x01`,
//! 3. a legacy CIDv0, a bare multihash either as base58btc text or as raw
//!    bytes.
//!
//! Whatever the framing, the multihash is checked on its own before the
//! `(version, codec, multihash)` triple goes through [`Cid::from_parts`].

use core::convert::TryFrom;
use std::io::Read;

use crate::{
  base,
  cid::Cid,
  codec::{
    self,
    Codec,
  },
  error::{
    Error,
    Result,
  },
  multihash,
  varint,
  version::Version,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Framing {
  Multibase,
  Binary,
  Legacy,
}

/// Expects at least one byte.
fn framing(bytes: &[u8]) -> Framing {
  if bytes[0] != 0 && base::is_encoded(bytes) {
    Framing::Multibase
  }
  else if bytes[0] <= 1 {
    Framing::Binary
  }
  else {
    Framing::Legacy
  }
}

/// Fails if `mh`, found `offset` bytes into the input, runs past the end its
/// header declares.
fn check_trailing(mh: &[u8], offset: usize) -> Result<()> {
  let expected = multihash::extent(mh)?;
  if mh.len() > expected {
    return Err(Error::TrailingBytes {
      expected: offset + expected,
      actual: offset + mh.len(),
    });
  }
  Ok(())
}

/// Decodes `<version byte><codec varint><multihash>`.
fn decode_tagged(raw: &[u8], strict: bool) -> Result<Cid> {
  let body = &raw[1..];
  let mh = codec::remove_prefix(body)?;
  if strict {
    check_trailing(mh, raw.len() - mh.len())?;
  }
  multihash::decode(mh)?;
  let version = Version::try_from(u64::from(raw[0]))?;
  let codec = codec::get_codec(body)?;
  Cid::from_parts(version, codec, mh.to_vec())
}

fn decode_legacy(bytes: &[u8], strict: bool) -> Result<Cid> {
  let mh = if Version::is_v0_binary(bytes) {
    bytes.to_vec()
  }
  else {
    base::decode_base58(bytes)?
  };
  if strict {
    check_trailing(&mh, 0)?;
  }
  multihash::decode(&mh)?;
  Cid::from_parts(Version::V0, Codec::DAG_PB, mh)
}

fn decode(bytes: &[u8], strict: bool) -> Result<Cid> {
  if bytes.len() < 2 {
    return Err(Error::TooShort);
  }
  let framing = framing(bytes);
  tracing::debug!(?framing, len = bytes.len(), strict, "decoding cid");
  match framing {
    Framing::Multibase => {
      let raw = base::decode(bytes)?;
      if raw.len() < 2 {
        return Err(Error::InvalidCidLength(raw.len()));
      }
      decode_tagged(&raw, strict)
    }
    Framing::Binary => decode_tagged(bytes, strict),
    Framing::Legacy => decode_legacy(bytes, strict),
  }
}

/// Parses a CID from multibase text, raw CID bytes or a legacy CIDv0.
///
/// # Errors
///
/// Returns `Error::TooShort` for fewer than two bytes,
/// `Error::InvalidCidLength` if multibase text decodes to fewer than two bytes,
/// `Error::InvalidBase58Multihash` if legacy input is not base58btc,
/// `Error::InvalidMultihashStructure` if the multihash is malformed, and fails
/// like [`Cid::from_parts`] on the recovered parts.
pub fn from_bytes(bytes: &[u8]) -> Result<Cid> { decode(bytes, false) }

/// Like [`from_bytes`], but rejects input that carries more than one CID.
///
/// # Errors
///
/// Returns `Error::TrailingBytes` if the input is longer than the CID it
/// starts with, and fails like [`from_bytes`] otherwise.
pub fn from_bytes_strict(bytes: &[u8]) -> Result<Cid> { decode(bytes, true) }

/// Parses the textual form of a CID. Text containing `/ipfs/` is first reduced
/// to its CID component with [`parse_ipfs_path`].
///
/// # Errors
///
/// Fails like [`from_bytes`].
pub fn from_str(text: &str) -> Result<Cid> {
  let text = if text.contains("/ipfs/") { parse_ipfs_path(text) } else { text };
  from_bytes(text.as_bytes())
}

fn strip_localhost(rest: &str) -> Option<&str> {
  let port = rest.strip_prefix("localhost:")?;
  let digits = port.find(|c: char| !c.is_ascii_digit())?;
  if digits == 0 {
    return None;
  }
  port[digits..].strip_prefix("/ipfs/")
}

/// Extracts the CID component of an `/ipfs/<cid>` path or of an
/// `ipfs.io/ipfs/<cid>` or `localhost:<port>/ipfs/<cid>` URL. Gateway URLs on
/// other hosts fall back to the segment after their first `/ipfs/`. Sub-paths,
/// queries and fragments are dropped. Anything else is returned unchanged.
pub fn parse_ipfs_path(path: &str) -> &str {
  let rest = path
    .strip_prefix("https://")
    .or_else(|| path.strip_prefix("http://"))
    .unwrap_or(path);
  let tail = rest
    .strip_prefix("/ipfs/")
    .or_else(|| rest.strip_prefix("ipfs.io/ipfs/"))
    .or_else(|| strip_localhost(rest))
    .or_else(|| rest.find("/ipfs/").map(|at| &rest[at + "/ipfs/".len()..]));
  match tail {
    Some(tail) => {
      let end = tail.find(|c: char| c == '/' || c == '?' || c == '#').unwrap_or(tail.len());
      &tail[..end]
    }
    None => path,
  }
}

/// Reads `<length varint><digest>` into `consumed`.
fn read_digest<R: Read>(r: &mut R, consumed: &mut Vec<u8>) -> Result<()> {
  let length = varint::read(r, consumed)?;
  let start = consumed.len();
  r.by_ref().take(length).read_to_end(consumed)?;
  if ((consumed.len() - start) as u64) < length {
    return Err(Error::UnexpectedEof);
  }
  Ok(())
}

fn read_multihash<R: Read>(r: &mut R, consumed: &mut Vec<u8>) -> Result<()> {
  varint::read(r, consumed)?;
  read_digest(r, consumed)
}

fn legacy_from_multihash(mh: &[u8]) -> Result<Cid> {
  multihash::decode(mh)?;
  Cid::from_parts(Version::V0, Codec::DAG_PB, mh.to_vec())
}

/// Reads exactly one CID from `r` and returns it with the number of bytes
/// consumed. Nothing past the end of the CID is read.
///
/// A first byte of `0x00` or `0x01` is a version tag: the codec varint and the
/// multihash that follow are read and the whole record is handed to
/// [`from_bytes`], so both accept and reject the same buffers. Any other first
/// byte that opens a known hash function code starts an untagged CIDv0, a bare
/// multihash of any length.
///
/// # Errors
///
/// Returns `Error::UnexpectedEof` if the stream ends early,
/// `Error::InvalidVersion` for any other first byte, `Error::Io` if reading
/// fails, and fails like [`from_bytes`] on what was read.
pub fn from_reader<R: Read>(r: &mut R) -> Result<(Cid, usize)> {
  let mut tag = [0u8; 1];
  r.read_exact(&mut tag)?;
  let mut consumed = Vec::new();
  let cid = match tag[0] {
    0 | 1 => {
      consumed.push(tag[0]);
      varint::read(r, &mut consumed)?;
      read_multihash(r, &mut consumed)?;
      from_bytes(&consumed)?
    }
    byte if multihash::is_code_start(byte) => {
      read_multihash(&mut (&tag[..]).chain(r.by_ref()), &mut consumed)?;
      legacy_from_multihash(&consumed)?
    }
    byte => return Err(Error::InvalidVersion(u64::from(byte))),
  };
  tracing::trace!(%cid, consumed = consumed.len(), "read cid from stream");
  Ok((cid, consumed.len()))
}

/// Names the multibase encoding of CID text without parsing it.
///
/// # Errors
///
/// Returns `Error::TooShort` for fewer than two bytes and
/// `Error::UnknownEncoding` if the first character is not a registered
/// multibase prefix.
pub fn extract_encoding(text: &str) -> Result<&'static str> {
  if text.len() < 2 {
    return Err(Error::TooShort);
  }
  if Version::is_v0_str(text) {
    return Ok(base::DEFAULT_ENCODING);
  }
  let code = text.chars().next().ok_or(Error::TooShort)?;
  Ok(base::name(base::from_code(code)?))
}

/// Parses text or bytes, wrapping any failure.
///
/// # Errors
///
/// Returns `Error::ParseFailed` carrying the underlying error.
pub fn must_parse<T: AsRef<[u8]>>(value: T) -> Result<Cid> {
  let bytes = value.as_ref();
  let parsed = match std::str::from_utf8(bytes) {
    Ok(text) => from_str(text),
    Err(_) => from_bytes(bytes),
  };
  parsed.map_err(|err| Error::ParseFailed(Box::new(err)))
}

/// Returns whether `value` parses as a CID.
pub fn is_cid<T: AsRef<[u8]>>(value: T) -> bool { must_parse(value).is_ok() }
