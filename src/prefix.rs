//! CID prefixes: the version, codec and hash settings of a CID without the
//! digest, used to hash fresh data into CIDs of the same shape.
//!
//! On the wire a prefix is
//! `<version byte><codec varint><hash code varint><digest length varint>`.

use core::convert::TryFrom;

use crate::{
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

/// Metadata of a CID minus its digest.
///
/// A `mh_length` of `None` means the full digest of the hash function. It is
/// written as `0` and a `0` reads back as `None`, so `Some(0)` does not
/// survive a round trip through [`Prefix::to_bytes`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prefix {
  version: Version,
  codec: Codec,
  mh_type: String,
  mh_length: Option<usize>,
}

impl Prefix {
  /// # Errors
  ///
  /// Returns `Error::UnknownCodec` if `codec` is not registered and
  /// `Error::CodecVersionMismatch` for a v0 prefix with a codec other than
  /// `dag-pb`.
  pub fn new(
    version: Version,
    codec: &str,
    mh_type: &str,
    mh_length: Option<usize>,
  ) -> Result<Self> {
    let codec = Codec::from_name(codec)?;
    if version == Version::V0 && codec != Codec::DAG_PB {
      return Err(Error::CodecVersionMismatch(codec.name().to_owned()));
    }
    Ok(Self { version, codec, mh_type: mh_type.to_owned(), mh_length })
  }

  /// The prefix of a CIDv0: `dag-pb` with a full sha2-256 digest.
  pub fn v0() -> Self {
    Self {
      version: Version::V0,
      codec: Codec::DAG_PB,
      mh_type: "sha2-256".to_owned(),
      mh_length: None,
    }
  }

  /// A CIDv1 prefix. Any registered codec is allowed.
  pub fn v1(codec: Codec, mh_type: &str, mh_length: Option<usize>) -> Self {
    Self { version: Version::V1, codec, mh_type: mh_type.to_owned(), mh_length }
  }

  pub fn version(&self) -> Version { self.version }

  pub fn codec(&self) -> Codec { self.codec }

  pub fn mh_type(&self) -> &str { &self.mh_type }

  pub fn mh_length(&self) -> Option<usize> { self.mh_length }

  /// Hashes `data` and wraps the digest into a CID with this prefix.
  ///
  /// # Errors
  ///
  /// Returns `Error::UnsupportedHashAlgorithm` if `mh_type` cannot be
  /// computed and `Error::InvalidDigestLength` if `mh_length` exceeds the
  /// digest.
  pub fn sum(&self, data: &[u8]) -> Result<Cid> {
    let mh = multihash::sum(&self.mh_type, self.mh_length, data)?;
    Cid::from_parts(self.version, self.codec, mh)
  }

  /// Serializes the prefix.
  ///
  /// # Errors
  ///
  /// Returns `Error::UnknownHashType` if `mh_type` has no code in the prefix
  /// hash table.
  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    let (codec_code, _) = varint::decode(&codec::get_prefix(self.codec.name())?)?;
    let mh_code = multihash::prefix_code(&self.mh_type)?;
    let mut out = vec![u64::from(self.version) as u8];
    varint::write(codec_code, &mut out);
    varint::write(mh_code, &mut out);
    varint::write(self.mh_length.unwrap_or(0) as u64, &mut out);
    Ok(out)
  }

  /// Reads a prefix from the front of `data`. Anything after the digest
  /// length is ignored.
  ///
  /// # Errors
  ///
  /// Returns `Error::TooShort` for empty input, `Error::InvalidVersion` if the
  /// first byte is neither 0 nor 1, `Error::MalformedVarint` if a field is cut
  /// short, `Error::UnknownCodec` and `Error::UnknownHashCode` for codes
  /// missing from their tables and `Error::CodecVersionMismatch` for a v0
  /// prefix with a codec other than `dag-pb`.
  pub fn from_bytes(data: &[u8]) -> Result<Self> {
    let (&version, rest) = data.split_first().ok_or(Error::TooShort)?;
    let version = Version::try_from(u64::from(version))?;
    let (codec_code, rest) = varint::decode(rest)?;
    let codec = Codec::from_code(codec_code)?;
    let (mh_code, rest) = varint::decode(rest)?;
    let mh_type = multihash::prefix_name(mh_code)?;
    let (mh_length, _) = varint::decode(rest)?;
    let mh_length = if mh_length == 0 { None } else { Some(mh_length as usize) };
    Self::new(version, codec.name(), mh_type, mh_length)
  }
}
