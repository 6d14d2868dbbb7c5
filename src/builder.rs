//! Builders hash data into CIDs of a fixed shape and can be switched to a
//! different codec without touching their hash settings.

use crate::{
  cid::{
    Cid,
    CidV0,
    CidV1,
  },
  codec::Codec,
  error::Result,
  multihash,
};

/// Builds CIDv0s: `dag-pb` over a sha2-256 digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct V0Builder;

impl V0Builder {
  /// # Errors
  ///
  /// Never fails in practice; the error type is shared with [`V1Builder`].
  pub fn sum(&self, data: &[u8]) -> Result<CidV0> {
    CidV0::new(multihash::sum("sha2-256", None, data)?)
  }

  pub fn codec(&self) -> &str { Codec::DAG_PB.name() }

  pub fn with_codec(&self, codec: &str) -> Builder {
    if codec == Codec::DAG_PB.name() {
      Builder::V0(*self)
    }
    else {
      Builder::V1(V1Builder::new(codec, "sha2-256", None))
    }
  }
}

/// Builds CIDv1s with a configurable codec and hash function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct V1Builder {
  codec: String,
  mh_type: String,
  mh_length: Option<usize>,
}

impl V1Builder {
  /// The codec and hash function are only checked once data is hashed.
  pub fn new(codec: &str, mh_type: &str, mh_length: Option<usize>) -> Self {
    Self {
      codec: codec.to_owned(),
      mh_type: mh_type.to_owned(),
      mh_length,
    }
  }

  /// # Errors
  ///
  /// Returns `Error::UnknownCodec` if the codec is not registered,
  /// `Error::UnsupportedHashAlgorithm` if the hash function cannot be computed
  /// and `Error::InvalidDigestLength` if the length exceeds the digest.
  pub fn sum(&self, data: &[u8]) -> Result<CidV1> {
    let codec = Codec::from_name(&self.codec)?;
    CidV1::new(codec, multihash::sum(&self.mh_type, self.mh_length, data)?)
  }

  pub fn codec(&self) -> &str { &self.codec }

  pub fn mh_type(&self) -> &str { &self.mh_type }

  pub fn mh_length(&self) -> Option<usize> { self.mh_length }

  pub fn with_codec(&self, codec: &str) -> Builder {
    if codec == self.codec {
      Builder::V1(self.clone())
    }
    else {
      Builder::V1(Self { codec: codec.to_owned(), ..self.clone() })
    }
  }
}

/// Either builder.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builder {
  V0(V0Builder),
  V1(V1Builder),
}

impl Builder {
  /// # Errors
  ///
  /// Fails like [`V1Builder::sum`].
  pub fn sum(&self, data: &[u8]) -> Result<Cid> {
    match self {
      Self::V0(builder) => Ok(Cid::V0(builder.sum(data)?)),
      Self::V1(builder) => Ok(Cid::V1(builder.sum(data)?)),
    }
  }

  pub fn codec(&self) -> &str {
    match self {
      Self::V0(builder) => builder.codec(),
      Self::V1(builder) => builder.codec(),
    }
  }

  pub fn with_codec(&self, codec: &str) -> Self {
    match self {
      Self::V0(builder) => builder.with_codec(codec),
      Self::V1(builder) => builder.with_codec(codec),
    }
  }
}

impl Default for Builder {
  fn default() -> Self { Self::V0(V0Builder) }
}

impl From<V0Builder> for Builder {
  fn from(builder: V0Builder) -> Self { Self::V0(builder) }
}

impl From<V1Builder> for Builder {
  fn from(builder: V1Builder) -> Self { Self::V1(builder) }
}
