use core::{
  convert::TryFrom,
  fmt,
};

use crate::{
  base,
  error::{
    Error,
    Result,
  },
  multihash,
};

/// The version of a CID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
  /// Bare base58btc multihash, implicitly `dag-pb`.
  V0,
  /// Version byte, codec prefix and multihash.
  V1,
}

impl Version {
  /// Checks whether a version number is valid.
  pub fn is_valid(version: u64) -> bool { Version::try_from(version).is_ok() }

  /// Returns whether `text` has the shape of a CIDv0: 46 characters starting
  /// with `Qm`.
  pub fn is_v0_str(text: &str) -> bool {
    text.len() == 46 && text.starts_with("Qm")
  }

  /// Returns whether `data` starts like the raw bytes of a CIDv0: a readable
  /// multihash header whose digest fits in `data`, in input that cannot be
  /// base58btc text.
  pub fn is_v0_binary(data: &[u8]) -> bool {
    !base::is_base58(data)
      && multihash::extent(data).map_or(false, |end| end <= data.len())
  }
}

impl Default for Version {
  fn default() -> Self { Version::V1 }
}

impl From<Version> for u64 {
  fn from(ver: Version) -> u64 {
    match ver {
      Version::V0 => 0,
      Version::V1 => 1,
    }
  }
}

impl TryFrom<u64> for Version {
  type Error = Error;

  fn try_from(raw: u64) -> Result<Self> {
    match raw {
      0 => Ok(Self::V0),
      1 => Ok(Self::V1),
      _ => Err(Error::InvalidVersion(raw)),
    }
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", u64::from(*self))
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;

  #[test]
  fn version_numbers() {
    assert_eq!(Version::try_from(0).unwrap(), Version::V0);
    assert_eq!(Version::try_from(1).unwrap(), Version::V1);
    assert!(matches!(Version::try_from(2), Err(Error::InvalidVersion(2))));
    assert!(Version::is_valid(1));
    assert!(!Version::is_valid(3));
    assert_eq!(Version::V1.to_string(), "1");
  }

  #[test]
  fn v0_shapes() {
    assert!(Version::is_v0_str("QmaozNR7DZHQK1ZcU9p7QdrshMvXqWK6gpu5rmrkPdT3L4"));
    assert!(!Version::is_v0_str("zdj7WhuEjrB52m1BisYCtmjH1hSKa7yZ3jEZ9JcXaFRD51wVz"));
    assert!(!Version::is_v0_str("Qm"));
    assert!(Version::is_v0_binary(&[0x12, 0x01, 0xb9]));
    assert!(Version::is_v0_binary(&[0x13, 0x02, 0xb9, 0x4d, 0x27]));
    assert!(!Version::is_v0_binary(&[0x12, 0x20, 0xb9]));
    assert!(!Version::is_v0_binary(&[0x12]));
    assert!(!Version::is_v0_binary(b"Qmaoz"));
  }

  #[quickcheck]
  fn version_u64_id(v: Version) -> bool {
    Version::try_from(u64::from(v)).map_or(false, |w| w == v)
  }
}
