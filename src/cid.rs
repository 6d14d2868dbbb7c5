//! The CID value type.
//!
//! A CID is the triple `(version, codec, multihash)`. Equality, ordering and
//! hashing all follow that triple, the binary and textual forms are derived
//! from it on demand.

use core::{
  convert::TryFrom,
  fmt,
  str::FromStr,
};
use std::collections::BTreeMap;

use multibase::Base;

use crate::{
  base,
  codec::Codec,
  error::{
    Error,
    Result,
  },
  multihash,
  parse,
  prefix::Prefix,
  version::Version,
};

/// Behaviour shared by both CID versions.
pub trait ContentId {
  fn version(&self) -> Version;

  fn codec(&self) -> Codec;

  /// The raw multihash bytes.
  fn multihash(&self) -> &[u8];

  /// The canonical binary form.
  fn buffer(&self) -> Vec<u8>;

  /// The default textual form.
  fn encode(&self) -> String;

  /// The textual form in the multibase encoding called `encoding`. A CIDv0 has
  /// a single textual form and ignores the argument.
  ///
  /// # Errors
  ///
  /// Returns `Error::UnknownEncoding` if `encoding` is not registered.
  fn encode_with(&self, encoding: &str) -> Result<String>;

  /// The metadata needed to hash new data into a CID of the same shape.
  ///
  /// # Errors
  ///
  /// Returns `Error::UnknownHashCode` if the hash function of the multihash
  /// cannot be carried by a [`Prefix`].
  fn prefix(&self) -> Result<Prefix> {
    let info = multihash::decode(self.multihash())?;
    let mh_type = multihash::prefix_name(info.code)?;
    Prefix::new(self.version(), self.codec().name(), mh_type, Some(info.length))
  }
}

/// A version 0 CID: a bare multihash, implicitly `dag-pb`. Legacy CIDs carry
/// sha2-256 digests, but any structurally valid multihash is accepted.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CidV0 {
  multihash: Vec<u8>,
}

impl CidV0 {
  /// # Errors
  ///
  /// Returns `Error::InvalidMultihashStructure` if `multihash` is not a valid
  /// multihash.
  pub fn new(multihash: Vec<u8>) -> Result<Self> {
    multihash::decode(&multihash)?;
    Ok(Self { multihash })
  }

  #[cfg(any(test, feature = "arb"))]
  pub(crate) fn new_unchecked(multihash: Vec<u8>) -> Self { Self { multihash } }

  /// The same content as a CIDv1 with the `dag-pb` codec.
  pub fn to_v1(&self) -> CidV1 {
    CidV1 { codec: Codec::DAG_PB, multihash: self.multihash.clone() }
  }

  pub fn into_multihash(self) -> Vec<u8> { self.multihash }
}

impl ContentId for CidV0 {
  fn version(&self) -> Version { Version::V0 }

  fn codec(&self) -> Codec { Codec::DAG_PB }

  fn multihash(&self) -> &[u8] { &self.multihash }

  fn buffer(&self) -> Vec<u8> { self.multihash.clone() }

  fn encode(&self) -> String { base::encode_base58(&self.multihash) }

  fn encode_with(&self, _encoding: &str) -> Result<String> { Ok(self.encode()) }
}

/// A version 1 CID: version byte, codec prefix and multihash.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CidV1 {
  codec: Codec,
  multihash: Vec<u8>,
}

impl CidV1 {
  /// # Errors
  ///
  /// Returns `Error::InvalidMultihashStructure` if `multihash` is not a valid
  /// multihash.
  pub fn new(codec: Codec, multihash: Vec<u8>) -> Result<Self> {
    multihash::decode(&multihash)?;
    Ok(Self { codec, multihash })
  }

  #[cfg(any(test, feature = "arb"))]
  pub(crate) fn new_unchecked(codec: Codec, multihash: Vec<u8>) -> Self {
    Self { codec, multihash }
  }

  /// The same content as a CIDv0.
  ///
  /// # Errors
  ///
  /// Returns `Error::CodecVersionMismatch` unless the codec is `dag-pb`.
  pub fn to_v0(&self) -> Result<CidV0> {
    if self.codec != Codec::DAG_PB {
      return Err(Error::CodecVersionMismatch(self.codec.name().to_owned()));
    }
    Ok(CidV0 { multihash: self.multihash.clone() })
  }
}

impl ContentId for CidV1 {
  fn version(&self) -> Version { Version::V1 }

  fn codec(&self) -> Codec { self.codec }

  fn multihash(&self) -> &[u8] { &self.multihash }

  fn buffer(&self) -> Vec<u8> {
    let mut out = vec![u64::from(Version::V1) as u8];
    out.extend_from_slice(&self.codec.prefix());
    out.extend_from_slice(&self.multihash);
    out
  }

  fn encode(&self) -> String { multibase::encode(Base::Base58Btc, self.buffer()) }

  fn encode_with(&self, encoding: &str) -> Result<String> {
    base::encode(encoding, &self.buffer())
  }
}

/// A content identifier of either version.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cid {
  V0(CidV0),
  V1(CidV1),
}

impl Cid {
  /// Builds a CID from its parts, checking them the same way the parser does.
  ///
  /// # Errors
  ///
  /// Returns `Error::InvalidVersion` for versions other than 0 and 1,
  /// `Error::UnknownCodec` if `codec` is not registered,
  /// `Error::CodecVersionMismatch` for a v0 CID with a codec other than
  /// `dag-pb`, and fails like [`CidV0::new`] or [`CidV1::new`] on the multihash.
  pub fn new(version: u64, codec: &str, multihash: Vec<u8>) -> Result<Self> {
    let version = Version::try_from(version)?;
    let codec = Codec::from_name(codec)?;
    Self::from_parts(version, codec, multihash)
  }

  /// Like [`Cid::new`] for already typed parts.
  ///
  /// # Errors
  ///
  /// Fails like [`Cid::new`].
  pub fn from_parts(
    version: Version,
    codec: Codec,
    multihash: Vec<u8>,
  ) -> Result<Self> {
    match version {
      Version::V0 => {
        if codec != Codec::DAG_PB {
          return Err(Error::CodecVersionMismatch(codec.name().to_owned()));
        }
        Ok(Self::V0(CidV0::new(multihash)?))
      }
      Version::V1 => Ok(Self::V1(CidV1::new(codec, multihash)?)),
    }
  }

  /// Create a new CIDv0.
  ///
  /// # Errors
  ///
  /// Fails like [`CidV0::new`].
  pub fn new_v0(multihash: Vec<u8>) -> Result<Self> {
    Ok(Self::V0(CidV0::new(multihash)?))
  }

  /// Create a new CIDv1.
  ///
  /// # Errors
  ///
  /// Fails like [`CidV1::new`].
  pub fn new_v1(codec: Codec, multihash: Vec<u8>) -> Result<Self> {
    Ok(Self::V1(CidV1::new(codec, multihash)?))
  }

  /// Converts to a CIDv0.
  ///
  /// # Errors
  ///
  /// Fails like [`CidV1::to_v0`].
  pub fn to_v0(&self) -> Result<Self> {
    match self {
      Self::V0(_) => Ok(self.clone()),
      Self::V1(cid) => Ok(Self::V0(cid.to_v0()?)),
    }
  }

  /// Converts to a CIDv1.
  pub fn to_v1(&self) -> Self {
    match self {
      Self::V0(cid) => Self::V1(cid.to_v1()),
      Self::V1(_) => self.clone(),
    }
  }

  /// Returns the canonical binary form.
  pub fn to_bytes(&self) -> Vec<u8> { self.buffer() }

  /// `{"cid": <text>}`, for attaching the CID to structured log records.
  pub fn loggable(&self) -> BTreeMap<&'static str, String> {
    let mut fields = BTreeMap::new();
    fields.insert("cid", self.encode());
    fields
  }

  fn inner(&self) -> &dyn ContentId {
    match self {
      Self::V0(cid) => cid,
      Self::V1(cid) => cid,
    }
  }
}

impl ContentId for Cid {
  fn version(&self) -> Version { self.inner().version() }

  fn codec(&self) -> Codec { self.inner().codec() }

  fn multihash(&self) -> &[u8] {
    match self {
      Self::V0(cid) => cid.multihash(),
      Self::V1(cid) => cid.multihash(),
    }
  }

  fn buffer(&self) -> Vec<u8> { self.inner().buffer() }

  fn encode(&self) -> String { self.inner().encode() }

  fn encode_with(&self, encoding: &str) -> Result<String> {
    self.inner().encode_with(encoding)
  }
}

impl From<CidV0> for Cid {
  fn from(cid: CidV0) -> Self { Self::V0(cid) }
}

impl From<CidV1> for Cid {
  fn from(cid: CidV1) -> Self { Self::V1(cid) }
}

impl From<Cid> for Vec<u8> {
  fn from(cid: Cid) -> Self { cid.buffer() }
}

impl From<Cid> for String {
  fn from(cid: Cid) -> Self { cid.encode() }
}

impl FromStr for Cid {
  type Err = Error;

  fn from_str(text: &str) -> Result<Self> { parse::from_str(text) }
}

impl TryFrom<&str> for Cid {
  type Error = Error;

  fn try_from(text: &str) -> Result<Self> { parse::from_str(text) }
}

impl TryFrom<String> for Cid {
  type Error = Error;

  fn try_from(text: String) -> Result<Self> { parse::from_str(&text) }
}

impl TryFrom<&[u8]> for Cid {
  type Error = Error;

  fn try_from(bytes: &[u8]) -> Result<Self> { parse::from_bytes(bytes) }
}

impl TryFrom<Vec<u8>> for Cid {
  type Error = Error;

  fn try_from(bytes: Vec<u8>) -> Result<Self> { parse::from_bytes(&bytes) }
}

impl fmt::Display for CidV0 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.encode())
  }
}

impl fmt::Display for CidV1 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.encode())
  }
}

impl fmt::Display for Cid {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.encode())
  }
}

fn debug_triple(
  f: &mut fmt::Formatter,
  name: &str,
  cid: &dyn ContentId,
) -> fmt::Result {
  if f.alternate() {
    f.debug_struct(name)
      .field("version", &cid.version())
      .field("codec", &cid.codec())
      .field("multihash", &cid.multihash())
      .finish()
  }
  else {
    write!(f, "{}({})", name, cid.encode())
  }
}

impl fmt::Debug for CidV0 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    debug_triple(f, "CidV0", self)
  }
}

impl fmt::Debug for CidV1 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    debug_triple(f, "CidV1", self)
  }
}

impl fmt::Debug for Cid {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    debug_triple(f, "Cid", self.inner())
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use std::collections::HashSet;

  pub fn hello_hash() -> Vec<u8> {
    multihash::sum("sha2-256", None, b"hello world").unwrap()
  }

  #[test]
  fn v0_encodes_as_bare_base58() {
    let cid = CidV0::new(hello_hash()).unwrap();
    assert_eq!(cid.encode(), "QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4");
    assert_eq!(
      cid.encode_with("base32").unwrap(),
      "QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4"
    );
    assert_eq!(cid.buffer(), hello_hash());
    assert_eq!(cid.codec(), Codec::DAG_PB);
  }

  #[test]
  fn v1_encodings() {
    let cid = CidV1::new(Codec::DAG_PB, hello_hash()).unwrap();
    assert_eq!(
      cid.encode(),
      "zdj7WhuEjrB52m1BisYCtmjH1hSKa7yZ3jEZ9JcXaFRD51wVz"
    );
    assert_eq!(
      cid.encode_with("base32").unwrap(),
      "bafybeifzjut3te2nhyekklss27nh3k72ysco7y32koao5eei66wof36n5e"
    );
    assert_eq!(
      cid.encode_with("base16").unwrap(),
      format!("f0170{}", hex::encode(hello_hash()))
    );
    assert!(matches!(
      cid.encode_with("base99"),
      Err(Error::UnknownEncoding(_))
    ));
    let raw = CidV1::new(Codec::RAW, hello_hash()).unwrap();
    assert_eq!(
      raw.encode_with("base32").unwrap(),
      "bafkreifzjut3te2nhyekklss27nh3k72ysco7y32koao5eei66wof36n5e"
    );
  }

  #[test]
  fn v1_buffer_layout() {
    let cid = CidV1::new(Codec::DAG_JSON, hello_hash()).unwrap();
    let buffer = cid.buffer();
    assert_eq!(&buffer[..3], &[0x01, 0xa9, 0x02]);
    assert_eq!(&buffer[3..], hello_hash().as_slice());
  }

  #[test]
  fn version_conversion() {
    let v0 = Cid::new_v0(hello_hash()).unwrap();
    let v1 = v0.to_v1();
    assert_eq!(v1.version(), Version::V1);
    assert_eq!(v1.codec(), Codec::DAG_PB);
    assert_ne!(v0, v1);
    assert_eq!(v1.to_v0().unwrap(), v0);
    let raw = Cid::new_v1(Codec::RAW, hello_hash()).unwrap();
    assert!(matches!(raw.to_v0(), Err(Error::CodecVersionMismatch(_))));
  }

  #[quickcheck]
  fn v0_v1_v0_for_any_hash(data: Vec<u8>, pick: usize) -> bool {
    let names = [
      "sha2-256",
      "sha2-512",
      "sha3-224",
      "sha3-256",
      "sha3-512",
      "blake2b-256",
      "blake2b-512",
    ];
    let name = names[pick % names.len()];
    match multihash::sum(name, None, &data).and_then(Cid::new_v0) {
      Ok(v0) => {
        let v1 = v0.to_v1();
        v1.codec() == Codec::DAG_PB && v1.to_v0().map_or(false, |c| c == v0)
      }
      Err(_) => false,
    }
  }

  #[test]
  fn loggable_names_the_cid() {
    let cid = Cid::new_v0(hello_hash()).unwrap();
    let fields = cid.loggable();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["cid"], "QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4");
  }

  #[test]
  fn validating_constructor() {
    assert!(matches!(
      Cid::new(2, "dag-pb", hello_hash()),
      Err(Error::InvalidVersion(2))
    ));
    assert!(matches!(
      Cid::new(1, "not-a-codec", hello_hash()),
      Err(Error::UnknownCodec(_))
    ));
    assert!(matches!(
      Cid::new(0, "raw", hello_hash()),
      Err(Error::CodecVersionMismatch(_))
    ));
    assert!(matches!(
      Cid::new(1, "raw", vec![0x12, 0x20, 0x00]),
      Err(Error::InvalidMultihashStructure(_))
    ));
    assert!(matches!(
      Cid::new(0, "dag-pb", b"different".to_vec()),
      Err(Error::InvalidMultihashStructure(_))
    ));
    let sha512 = multihash::sum("sha2-512", None, b"hello world").unwrap();
    assert_eq!(Cid::new(0, "dag-pb", sha512.clone()).unwrap().multihash(), &sha512[..]);
    assert!(Cid::new(1, "dag-pb", sha512).is_ok());
    assert!(Cid::new(0, "dag-pb", hello_hash()).is_ok());
  }

  #[test]
  fn equality_follows_the_triple() {
    let a = Cid::new(1, "raw", hello_hash()).unwrap();
    let b = Cid::new(1, "raw", hello_hash()).unwrap();
    let c = Cid::new(1, "dag-cbor", hello_hash()).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    let set: HashSet<Cid> = vec![a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
  }

  #[test]
  fn prefix_extraction() {
    let cid = Cid::new(1, "dag-cbor", hello_hash()).unwrap();
    let prefix = cid.prefix().unwrap();
    assert_eq!(prefix.version(), Version::V1);
    assert_eq!(prefix.codec(), Codec::DAG_CBOR);
    assert_eq!(prefix.mh_type(), "sha2-256");
    assert_eq!(prefix.mh_length(), Some(32));
    assert_eq!(prefix.sum(b"hello world").unwrap(), cid);
    let md5 = multihash::encode(&[0u8; 16], "md5", None).unwrap();
    let cid = Cid::new(1, "raw", md5).unwrap();
    assert!(matches!(cid.prefix(), Err(Error::UnknownHashCode(0xd5))));
  }

  #[test]
  fn formatting() {
    let cid = Cid::new_v0(hello_hash()).unwrap();
    assert_eq!(
      format!("{:?}", cid),
      "Cid(QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4)"
    );
    assert!(format!("{:#?}", cid).contains("version: V0"));
    let text: String = cid.clone().into();
    assert_eq!(text, cid.to_string());
    let bytes: Vec<u8> = cid.clone().into();
    assert_eq!(bytes, cid.to_bytes());
  }
}
