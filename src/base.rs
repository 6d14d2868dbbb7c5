//! Multibase encodings addressed by their registry names.

use multibase::Base;

use crate::error::{
  Error,
  Result,
};

/// Name of the encoding used when none is requested.
pub const DEFAULT_ENCODING: &str = "base58btc";

static ENCODINGS: &[(&str, Base)] = &[
  ("base2", Base::Base2),
  ("base8", Base::Base8),
  ("base10", Base::Base10),
  ("base16", Base::Base16Lower),
  ("base16upper", Base::Base16Upper),
  ("base32hex", Base::Base32HexLower),
  ("base32hexupper", Base::Base32HexUpper),
  ("base32hexpad", Base::Base32HexPadLower),
  ("base32hexpadupper", Base::Base32HexPadUpper),
  ("base32", Base::Base32Lower),
  ("base32upper", Base::Base32Upper),
  ("base32pad", Base::Base32PadLower),
  ("base32padupper", Base::Base32PadUpper),
  ("base32z", Base::Base32Z),
  ("base36", Base::Base36Lower),
  ("base36upper", Base::Base36Upper),
  ("base58flickr", Base::Base58Flickr),
  ("base58btc", Base::Base58Btc),
  ("base64", Base::Base64),
  ("base64pad", Base::Base64Pad),
  ("base64url", Base::Base64Url),
  ("base64urlpad", Base::Base64UrlPad),
];

/// Every registered encoding name.
pub fn names() -> impl Iterator<Item = &'static str> {
  ENCODINGS.iter().map(|(name, _)| *name)
}

/// Looks up an encoding by name.
///
/// # Errors
///
/// Returns `Error::UnknownEncoding` if `name` is not registered.
pub fn from_name(name: &str) -> Result<Base> {
  ENCODINGS
    .iter()
    .find(|(n, _)| *n == name)
    .map(|(_, base)| *base)
    .ok_or_else(|| Error::UnknownEncoding(name.to_owned()))
}

/// Looks up an encoding by its prefix character.
///
/// # Errors
///
/// Returns `Error::UnknownEncoding` if `code` does not prefix any registered
/// encoding.
pub fn from_code(code: char) -> Result<Base> {
  ENCODINGS
    .iter()
    .find(|(_, base)| base.code() == code)
    .map(|(_, base)| *base)
    .ok_or_else(|| Error::UnknownEncoding(code.to_string()))
}

/// The registry name of `base`.
pub fn name(base: Base) -> &'static str {
  ENCODINGS
    .iter()
    .find(|(_, b)| *b == base)
    .map(|(name, _)| *name)
    .unwrap_or("identity")
}

/// Returns whether `data` is text whose first character is a known multibase
/// prefix. The payload itself is not checked.
pub fn is_encoded(data: &[u8]) -> bool {
  match std::str::from_utf8(data) {
    Ok(text) => text.chars().next().map_or(false, |c| from_code(c).is_ok()),
    Err(_) => false,
  }
}

/// Decodes multibase text, prefix character included.
///
/// # Errors
///
/// Returns `Error::UnknownEncoding` if the prefix is not registered and
/// `Error::InvalidMultibase` if the payload is not valid for that encoding.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
  let text = std::str::from_utf8(data)
    .map_err(|_| Error::InvalidMultibase(multibase::Error::InvalidBaseString))?;
  let code = text.chars().next().ok_or(Error::TooShort)?;
  let base = from_code(code)?;
  Ok(base.decode(&text[code.len_utf8()..])?)
}

/// Encodes `data` with the encoding called `name`, prefix character included.
///
/// # Errors
///
/// Returns `Error::UnknownEncoding` if `name` is not registered.
pub fn encode(name: &str, data: &[u8]) -> Result<String> {
  Ok(multibase::encode(from_name(name)?, data))
}

const BASE58_ALPHABET: &[u8] =
  b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Returns whether every byte of `data` is a base58btc digit.
pub fn is_base58(data: &[u8]) -> bool {
  data.iter().all(|b| BASE58_ALPHABET.contains(b))
}

/// Plain base58btc, without a multibase prefix.
pub fn encode_base58(data: &[u8]) -> String { Base::Base58Btc.encode(data) }

/// Decodes plain base58btc text.
///
/// # Errors
///
/// Returns `Error::InvalidBase58Multihash` if `data` is not base58btc text.
pub fn decode_base58(data: &[u8]) -> Result<Vec<u8>> {
  let text =
    std::str::from_utf8(data).map_err(|_| Error::InvalidBase58Multihash)?;
  Base::Base58Btc.decode(text).map_err(|_| Error::InvalidBase58Multihash)
}
