//! The multicodec registry: content-type names, their integer codes and the
//! varint prefixes those codes turn into on the wire.

use core::fmt;

use crate::{
  error::{
    Error,
    Result,
  },
  varint,
};

/// `(name, code)` pairs from the multicodec table.
static CODECS: &[(&str, u64)] = &[
  ("identity", 0x00),
  ("cidv1", 0x01),
  ("cidv2", 0x02),
  ("cidv3", 0x03),
  ("ip4", 0x04),
  ("tcp", 0x06),
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
  ("dccp", 0x21),
  ("murmur3-x64-64", 0x22),
  ("murmur3-32", 0x23),
  ("ip6", 0x29),
  ("ip6zone", 0x2a),
  ("path", 0x2f),
  ("multicodec", 0x30),
  ("multihash", 0x31),
  ("multiaddr", 0x32),
  ("multibase", 0x33),
  ("dns", 0x35),
  ("dns4", 0x36),
  ("dns6", 0x37),
  ("dnsaddr", 0x38),
  ("protobuf", 0x50),
  ("cbor", 0x51),
  ("raw", 0x55),
  ("dbl-sha2-256", 0x56),
  ("rlp", 0x60),
  ("bencode", 0x63),
  ("dag-pb", 0x70),
  ("dag-cbor", 0x71),
  ("libp2p-key", 0x72),
  ("git-raw", 0x78),
  ("torrent-info", 0x7b),
  ("torrent-file", 0x7c),
  ("leofcoin-block", 0x81),
  ("leofcoin-tx", 0x82),
  ("leofcoin-pr", 0x83),
  ("sctp", 0x84),
  ("dag-jose", 0x85),
  ("dag-cose", 0x86),
  ("eth-block", 0x90),
  ("eth-block-list", 0x91),
  ("eth-tx-trie", 0x92),
  ("eth-tx", 0x93),
  ("eth-tx-receipt-trie", 0x94),
  ("eth-tx-receipt", 0x95),
  ("eth-state-trie", 0x96),
  ("eth-account-snapshot", 0x97),
  ("eth-storage-trie", 0x98),
  ("bitcoin-block", 0xb0),
  ("bitcoin-tx", 0xb1),
  ("zcash-block", 0xc0),
  ("zcash-tx", 0xc1),
  ("stellar-block", 0xd0),
  ("stellar-tx", 0xd1),
  ("md4", 0xd4),
  ("md5", 0xd5),
  ("decred-block", 0xe0),
  ("decred-tx", 0xe1),
  ("ipld-ns", 0xe2),
  ("ipfs-ns", 0xe3),
  ("swarm-ns", 0xe4),
  ("ipns-ns", 0xe5),
  ("zeronet", 0xe6),
  ("secp256k1-pub", 0xe7),
  ("bls12_381-g1-pub", 0xea),
  ("bls12_381-g2-pub", 0xeb),
  ("x25519-pub", 0xec),
  ("ed25519-pub", 0xed),
  ("dash-block", 0xf0),
  ("dash-tx", 0xf1),
  ("udp", 0x0111),
  ("p2p-webrtc-star", 0x0113),
  ("p2p-webrtc-direct", 0x0114),
  ("p2p-circuit", 0x0122),
  ("dag-json", 0x0129),
  ("udt", 0x012d),
  ("utp", 0x012e),
  ("unix", 0x0190),
  ("p2p", 0x01a5),
  ("https", 0x01bb),
  ("onion", 0x01bc),
  ("onion3", 0x01bd),
  ("garlic64", 0x01be),
  ("quic", 0x01cc),
  ("ws", 0x01dd),
  ("wss", 0x01de),
  ("http", 0x01e0),
  ("json", 0x0200),
  ("messagepack", 0x0201),
  ("car", 0x0202),
  ("libp2p-peer-record", 0x0301),
  ("sha2-256-trunc254-padded", 0x1012),
  ("sha2-224", 0x1013),
  ("sha2-512-224", 0x1014),
  ("sha2-512-256", 0x1015),
  ("x11", 0x1100),
  ("blake2b-256", 0xb220),
  ("blake2b-384", 0xb230),
  ("blake2b-512", 0xb240),
  ("blake2s-128", 0xb250),
  ("blake2s-256", 0xb260),
  ("poseidon-bls12_381-a2-fc1", 0xb401),
  ("fil-commitment-unsealed", 0xf101),
  ("fil-commitment-sealed", 0xf102),
];

/// A multicodec known to the registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codec {
  name: &'static str,
  code: u64,
}

impl Codec {
  /// MerkleDAG protobuf, the only codec a CIDv0 can carry.
  pub const DAG_PB: Self = Self { name: "dag-pb", code: 0x70 };
  /// MerkleDAG cbor.
  pub const DAG_CBOR: Self = Self { name: "dag-cbor", code: 0x71 };
  /// MerkleDAG json.
  pub const DAG_JSON: Self = Self { name: "dag-json", code: 0x0129 };
  /// Raw binary.
  pub const RAW: Self = Self { name: "raw", code: 0x55 };

  /// Looks up a codec by its registry name.
  ///
  /// # Errors
  ///
  /// Returns `Error::UnknownCodec` if no codec has that name.
  pub fn from_name(name: &str) -> Result<Self> {
    CODECS
      .iter()
      .find(|(n, _)| *n == name)
      .map(|&(name, code)| Self { name, code })
      .ok_or_else(|| Error::UnknownCodec(name.to_owned()))
  }

  /// Looks up a codec by its integer code.
  ///
  /// # Errors
  ///
  /// Returns `Error::UnknownCodec` if no codec has that code.
  pub fn from_code(code: u64) -> Result<Self> {
    CODECS
      .iter()
      .find(|(_, c)| *c == code)
      .map(|&(name, code)| Self { name, code })
      .ok_or_else(|| Error::UnknownCodec(format!("{:#x}", code)))
  }

  /// Every registered codec, in code order.
  pub fn all() -> impl Iterator<Item = Self> {
    CODECS.iter().map(|&(name, code)| Self { name, code })
  }

  pub fn name(&self) -> &'static str { self.name }

  pub fn code(&self) -> u64 { self.code }

  /// The varint prefix this codec puts in front of data.
  pub fn prefix(&self) -> Vec<u8> { varint::encode(self.code) }
}

impl fmt::Debug for Codec {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}({:#x})", self.name, self.code)
  }
}

impl fmt::Display for Codec {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// Returns whether `name` is a registered codec.
pub fn is_codec(name: &str) -> bool { CODECS.iter().any(|(n, _)| *n == name) }

/// Returns the varint prefix of the codec called `name`.
///
/// # Errors
///
/// Returns `Error::UnknownCodec` if `name` is not registered.
pub fn get_prefix(name: &str) -> Result<Vec<u8>> {
  Ok(Codec::from_name(name)?.prefix())
}

/// Prepends the prefix of the codec called `name` to `data`.
///
/// # Errors
///
/// Returns `Error::UnknownCodec` if `name` is not registered.
pub fn add_prefix(name: &str, data: &[u8]) -> Result<Vec<u8>> {
  let mut out = get_prefix(name)?;
  out.extend_from_slice(data);
  Ok(out)
}

/// Strips the leading codec prefix from `data`.
///
/// # Errors
///
/// Returns `Error::MalformedVarint` if `data` does not start with a varint.
pub fn remove_prefix(data: &[u8]) -> Result<&[u8]> {
  let (_, rest) = varint::decode(data)?;
  Ok(rest)
}

/// Returns the codec whose prefix `data` starts with.
///
/// # Errors
///
/// Returns `Error::MalformedVarint` if `data` does not start with a varint and
/// `Error::UnknownCodec` if the code is not registered.
pub fn get_codec(data: &[u8]) -> Result<Codec> {
  let (code, _) = varint::decode(data)?;
  Codec::from_code(code)
}

/// Splits `data` into its codec and whatever follows the prefix.
///
/// # Errors
///
/// Fails like [`get_codec`].
pub fn split_prefix(data: &[u8]) -> Result<(Codec, &[u8])> {
  let (code, rest) = varint::decode(data)?;
  Ok((Codec::from_code(code)?, rest))
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn table_is_a_bijection() {
    let names: HashSet<_> = CODECS.iter().map(|(n, _)| n).collect();
    let codes: HashSet<_> = CODECS.iter().map(|(_, c)| c).collect();
    assert_eq!(names.len(), CODECS.len());
    assert_eq!(codes.len(), CODECS.len());
    assert_eq!(Codec::all().count(), CODECS.len());
    for &(name, code) in CODECS {
      assert_eq!(Codec::from_name(name).unwrap().code(), code);
      assert_eq!(Codec::from_code(code).unwrap().name(), name);
    }
  }

  #[test]
  fn constants_match_table() {
    for codec in [Codec::DAG_PB, Codec::DAG_CBOR, Codec::DAG_JSON, Codec::RAW].iter() {
      assert_eq!(Codec::from_name(codec.name()).unwrap(), *codec);
    }
  }

  #[test]
  fn prefixes() {
    assert_eq!(get_prefix("dag-pb").unwrap(), vec![0x70]);
    assert_eq!(get_prefix("dag-json").unwrap(), vec![0xa9, 0x02]);
    assert_eq!(add_prefix("raw", &[0x12, 0x20]).unwrap(), vec![0x55, 0x12, 0x20]);
    assert_eq!(remove_prefix(&[0xa9, 0x02, 0x12]).unwrap(), &[0x12]);
    assert_eq!(get_codec(&[0x71, 0x12]).unwrap(), Codec::DAG_CBOR);
  }

  #[test]
  fn unknown_codecs() {
    assert!(!is_codec("some-random-codec"));
    assert!(is_codec("dag-pb"));
    assert!(matches!(
      Codec::from_name("some-random-codec"),
      Err(Error::UnknownCodec(_))
    ));
    assert!(matches!(get_codec(&[0x7f]), Err(Error::UnknownCodec(_))));
    assert!(matches!(get_codec(&[0x80]), Err(Error::MalformedVarint(_))));
  }

  #[test]
  fn split_prefix_keeps_rest() {
    let (codec, rest) = split_prefix(&[0x70, 0x12, 0x20]).unwrap();
    assert_eq!(codec, Codec::DAG_PB);
    assert_eq!(rest, &[0x12, 0x20]);
  }
}
