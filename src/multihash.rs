//! Multihashes: `<hash-function varint><digest-length varint><digest>`.
//!
//! This module validates the structure of raw multihash bytes, maps hash
//! function names to their codes and computes digests for the algorithms the
//! crate can delegate to `multihash-codetable`.

use multihash_codetable::{
  Code,
  MultihashDigest,
};

use crate::{
  error::{
    Error,
    Result,
  },
  varint,
};

/// The hash function code of SHA2-256.
pub const SHA2_256: u64 = 0x12;
/// Digest length of SHA2-256.
pub const SHA2_256_LEN: usize = 32;

/// Hash functions a [`crate::Prefix`] can name on the wire.
static PREFIX_HASHES: &[(&str, u64)] = &[
  ("sha1", 0x11),
  ("sha2-256", 0x12),
  ("sha2-512", 0x13),
  ("sha3-512", 0x14),
  ("sha3-256", 0x16),
  ("sha3-224", 0x17),
  ("blake2b-256", 0xb220),
  ("blake2b-512", 0xb240),
];

/// Every hash function the structural decoder accepts by name.
static HASHES: &[(&str, u64)] = &[
  ("identity", 0x00),
  ("sha1", 0x11),
  ("sha2-256", 0x12),
  ("sha2-512", 0x13),
  ("sha3-512", 0x14),
  ("sha3-384", 0x15),
  ("sha3-256", 0x16),
  ("sha3-224", 0x17),
  ("shake-128", 0x18),
  ("shake-256", 0x19),
  ("keccak-224", 0x1a),
  ("keccak-256", 0x1b),
  ("keccak-384", 0x1c),
  ("keccak-512", 0x1d),
  ("blake3", 0x1e),
  ("sha2-384", 0x20),
  ("murmur3-x64-64", 0x22),
  ("murmur3-32", 0x23),
  ("dbl-sha2-256", 0x56),
  ("md4", 0xd4),
  ("md5", 0xd5),
  ("sha2-256-trunc254-padded", 0x1012),
  ("sha2-224", 0x1013),
  ("sha2-512-224", 0x1014),
  ("sha2-512-256", 0x1015),
  ("blake2b-160", 0xb214),
  ("blake2b-256", 0xb220),
  ("blake2b-384", 0xb230),
  ("blake2b-512", 0xb240),
  ("blake2s-128", 0xb250),
  ("blake2s-256", 0xb260),
  ("poseidon-bls12_381-a2-fc1", 0xb401),
];

/// The parts of a structurally valid multihash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultihashInfo<'a> {
  pub code: u64,
  /// `None` for application specific codes.
  pub name: Option<&'static str>,
  pub length: usize,
  pub digest: &'a [u8],
}

fn lookup_name(table: &[(&'static str, u64)], code: u64) -> Option<&'static str> {
  table.iter().find(|(_, c)| *c == code).map(|(name, _)| *name)
}

fn lookup_code(table: &[(&'static str, u64)], name: &str) -> Option<u64> {
  table.iter().find(|(n, _)| *n == name).map(|(_, code)| *code)
}

fn is_app_code(code: u64) -> bool { (0x01..=0x0f).contains(&code) }

/// Code of a hash function a [`crate::Prefix`] can carry.
///
/// # Errors
///
/// Returns `Error::UnknownHashType` if the name is not in the prefix table.
pub fn prefix_code(name: &str) -> Result<u64> {
  lookup_code(PREFIX_HASHES, name)
    .ok_or_else(|| Error::UnknownHashType(name.to_owned()))
}

/// Name of a hash function a [`crate::Prefix`] can carry.
///
/// # Errors
///
/// Returns `Error::UnknownHashCode` if the code is not in the prefix table.
pub fn prefix_name(code: u64) -> Result<&'static str> {
  lookup_name(PREFIX_HASHES, code).ok_or(Error::UnknownHashCode(code))
}

/// Returns whether `byte` can open the code varint of a named hash function.
pub fn is_code_start(byte: u8) -> bool {
  HASHES
    .iter()
    .any(|(_, code)| *code != 0 && varint::encode(*code).first() == Some(&byte))
}

/// Splits the header off `bytes`, returning `(code, declared length, rest)`.
fn header(bytes: &[u8]) -> Result<(u64, usize, &[u8])> {
  let invalid = |e: Error| Error::InvalidMultihashStructure(e.to_string());
  let (code, rest) = varint::decode(bytes).map_err(invalid)?;
  let (length, rest) = varint::decode(rest).map_err(invalid)?;
  Ok((code, length as usize, rest))
}

/// Number of bytes the multihash at the front of `bytes` claims to occupy.
///
/// # Errors
///
/// Returns `Error::InvalidMultihashStructure` if the header cannot be read.
pub fn extent(bytes: &[u8]) -> Result<usize> {
  let (_, length, rest) = header(bytes)?;
  Ok((bytes.len() - rest.len()).saturating_add(length))
}

/// Checks that `bytes` is exactly one multihash with a known hash function and
/// returns its parts.
///
/// # Errors
///
/// Returns `Error::InvalidMultihashStructure` if the header is malformed, the
/// hash function code is unknown or the digest does not have the declared
/// length.
pub fn decode(bytes: &[u8]) -> Result<MultihashInfo> {
  let (code, length, digest) = header(bytes)?;
  let name = lookup_name(HASHES, code);
  if name.is_none() && !is_app_code(code) {
    return Err(Error::InvalidMultihashStructure(format!(
      "unsupported hash code {:#x}",
      code
    )));
  }
  if digest.len() != length {
    return Err(Error::InvalidMultihashStructure(format!(
      "inconsistent multihash length {} != {}",
      digest.len(),
      length
    )));
  }
  Ok(MultihashInfo { code, name, length, digest })
}

/// Wraps `digest` into a multihash for the hash function called `name`,
/// truncating it to `length` when one is given.
///
/// # Errors
///
/// Returns `Error::UnknownHashType` if `name` is not a known hash function and
/// `Error::InvalidDigestLength` if `length` exceeds the digest.
pub fn encode(digest: &[u8], name: &str, length: Option<usize>) -> Result<Vec<u8>> {
  let code = lookup_code(HASHES, name)
    .ok_or_else(|| Error::UnknownHashType(name.to_owned()))?;
  let length = length.unwrap_or_else(|| digest.len());
  if length > digest.len() {
    return Err(Error::InvalidDigestLength {
      requested: length,
      available: digest.len(),
    });
  }
  let mut out = Vec::with_capacity(length + 4);
  varint::write(code, &mut out);
  varint::write(length as u64, &mut out);
  out.extend_from_slice(&digest[..length]);
  Ok(out)
}

fn hasher(name: &str) -> Result<Code> {
  match name {
    "sha2-256" => Ok(Code::Sha2_256),
    "sha2-512" => Ok(Code::Sha2_512),
    "sha3-224" => Ok(Code::Sha3_224),
    "sha3-256" => Ok(Code::Sha3_256),
    "sha3-512" => Ok(Code::Sha3_512),
    "blake2b-256" => Ok(Code::Blake2b256),
    "blake2b-512" => Ok(Code::Blake2b512),
    _ => Err(Error::UnsupportedHashAlgorithm(name.to_owned())),
  }
}

/// Hashes `data` with the hash function called `name` and returns the bare
/// digest.
///
/// # Errors
///
/// Returns `Error::UnsupportedHashAlgorithm` for hash functions this crate
/// cannot compute.
pub fn digest(name: &str, data: &[u8]) -> Result<Vec<u8>> {
  Ok(hasher(name)?.digest(data).digest().to_vec())
}

/// Hashes `data` and wraps the digest into a multihash.
///
/// # Errors
///
/// Fails like [`digest`] and [`encode`].
pub fn sum(name: &str, length: Option<usize>, data: &[u8]) -> Result<Vec<u8>> {
  encode(&digest(name, data)?, name, length)
}

#[cfg(test)]
pub mod tests {
  use super::*;

  const HELLO_SHA2_256: &str =
    "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

  #[test]
  fn code_starts() {
    assert!(is_code_start(0x12));
    assert!(is_code_start(0x13));
    assert!(is_code_start(0xa0));
    assert!(!is_code_start(0x00));
    assert!(!is_code_start(0x02));
    assert!(!is_code_start(0x70));
  }

  #[test]
  fn sha2_256_of_hello_world() {
    let mh = sum("sha2-256", None, b"hello world").unwrap();
    assert_eq!(&mh[..2], &[0x12, 0x20]);
    assert_eq!(hex::encode(&mh[2..]), HELLO_SHA2_256);
    let info = decode(&mh).unwrap();
    assert_eq!(info.code, SHA2_256);
    assert_eq!(info.name, Some("sha2-256"));
    assert_eq!(info.length, SHA2_256_LEN);
    assert_eq!(info.digest, &mh[2..]);
  }

  #[test]
  fn truncated_digest() {
    let mh = sum("sha2-512", Some(32), b"hello world").unwrap();
    assert_eq!(&mh[..2], &[0x13, 0x20]);
    assert_eq!(mh.len(), 34);
    assert!(matches!(
      sum("sha2-256", Some(33), b"hello world"),
      Err(Error::InvalidDigestLength { requested: 33, available: 32 })
    ));
  }

  #[test]
  fn delegated_hashes() {
    for (name, len) in
      [("sha3-224", 28), ("sha3-256", 32), ("sha3-512", 64), ("blake2b-256", 32), ("blake2b-512", 64)]
        .iter()
    {
      let mh = sum(name, None, b"abc").unwrap();
      let info = decode(&mh).unwrap();
      assert_eq!(info.name, Some(*name));
      assert_eq!(info.length, *len);
    }
    assert!(matches!(
      digest("sha1", b"abc"),
      Err(Error::UnsupportedHashAlgorithm(_))
    ));
    assert!(matches!(
      digest("murmur3-32", b"abc"),
      Err(Error::UnsupportedHashAlgorithm(_))
    ));
  }

  #[test]
  fn blake2b_code_is_multibyte() {
    let mh = sum("blake2b-256", None, b"abc").unwrap();
    assert_eq!(&mh[..4], &[0xa0, 0xe4, 0x02, 0x20]);
    assert_eq!(extent(&mh).unwrap(), mh.len());
  }

  #[test]
  fn structural_errors() {
    let invalid = |bytes: &[u8]| {
      matches!(decode(bytes), Err(Error::InvalidMultihashStructure(_)))
    };
    assert!(invalid(&[]));
    assert!(invalid(&[0x12]));
    assert!(invalid(&[0x12, 0x20, 0x00]));
    assert!(invalid(&[0x12, 0x01, 0x00, 0x00]));
    assert!(invalid(&[0x7f, 0x01, 0x00]));
    assert!(invalid(&[0x12, 0x80]));
  }

  #[test]
  fn app_codes_are_nameless() {
    let info = decode(&[0x05, 0x02, 0xaa, 0xbb]).unwrap();
    assert_eq!(info.name, None);
    assert_eq!(info.digest, &[0xaa, 0xbb]);
  }

  #[test]
  fn extent_ignores_trailing() {
    let mut mh = sum("sha2-256", None, b"x").unwrap();
    mh.extend_from_slice(b"extra");
    assert_eq!(extent(&mh).unwrap(), 34);
    assert!(decode(&mh).is_err());
  }

  #[test]
  fn prefix_table_is_invertible() {
    for &(name, code) in PREFIX_HASHES {
      assert_eq!(prefix_code(name).unwrap(), code);
      assert_eq!(prefix_name(code).unwrap(), name);
      assert_eq!(lookup_code(HASHES, name), Some(code));
    }
    assert!(matches!(prefix_code("md5"), Err(Error::UnknownHashType(_))));
    assert!(matches!(prefix_name(0xd5), Err(Error::UnknownHashCode(0xd5))));
  }
}
