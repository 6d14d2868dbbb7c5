use multihash_codetable::{
  Code,
  MultihashDigest,
};
use quickcheck::{
  Arbitrary,
  Gen,
};
use rand::Rng;

use crate::{
  cid::{
    Cid,
    CidV0,
    CidV1,
  },
  codec::Codec,
  prefix::Prefix,
  varint,
  version::Version,
};

const HASHES: [(Code, &str); 7] = [
  (Code::Sha2_256, "sha2-256"),
  (Code::Sha2_512, "sha2-512"),
  (Code::Sha3_224, "sha3-224"),
  (Code::Sha3_256, "sha3-256"),
  (Code::Sha3_512, "sha3-512"),
  (Code::Blake2b256, "blake2b-256"),
  (Code::Blake2b512, "blake2b-512"),
];

fn arbitrary_hash() -> (Code, &'static str) {
  HASHES[rand::thread_rng().gen_range(0..HASHES.len())]
}

fn arbitrary_codec() -> Codec {
  let codecs: Vec<Codec> = Codec::all().collect();
  codecs[rand::thread_rng().gen_range(0..codecs.len())]
}

fn multihash(code: Code, data: &[u8]) -> Vec<u8> {
  let mh = code.digest(data);
  let mut out = varint::encode(mh.code());
  varint::write(u64::from(mh.size()), &mut out);
  out.extend_from_slice(mh.digest());
  out
}

impl Arbitrary for Version {
  fn arbitrary(_: &mut Gen) -> Self {
    if rand::thread_rng().gen_bool(0.7) { Version::V1 } else { Version::V0 }
  }
}

impl Arbitrary for Cid {
  fn arbitrary(g: &mut Gen) -> Self {
    let data: Vec<u8> = Arbitrary::arbitrary(g);
    match Version::arbitrary(g) {
      Version::V0 => {
        Cid::V0(CidV0::new_unchecked(multihash(Code::Sha2_256, &data)))
      }
      Version::V1 => {
        let (code, _) = arbitrary_hash();
        Cid::V1(CidV1::new_unchecked(arbitrary_codec(), multihash(code, &data)))
      }
    }
  }
}

impl Arbitrary for Prefix {
  fn arbitrary(g: &mut Gen) -> Self {
    match Version::arbitrary(g) {
      Version::V0 => Prefix::v0(),
      Version::V1 => {
        let mut rng = rand::thread_rng();
        let (_, mh_type) = arbitrary_hash();
        // Shortest digest in HASHES is sha3-224.
        let mh_length =
          if rng.gen_bool(0.5) { None } else { Some(rng.gen_range(1..=28)) };
        Prefix::v1(arbitrary_codec(), mh_type, mh_length)
      }
    }
  }
}
