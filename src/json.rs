//! IPLD JSON links: a CID is written as `{"/": "<cid text>"}`.

use core::fmt;

use serde::{
  de,
  ser::SerializeMap,
  Deserialize,
  Serialize,
  Serializer,
};
use serde_json::Value;

use crate::{
  cid::{
    Cid,
    ContentId,
  },
  error::Error,
  parse,
};

const SPECIAL_KEY: &str = "/";

impl Serialize for Cid {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where S: Serializer {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(SPECIAL_KEY, &self.encode())?;
    map.end()
  }
}

// Accepts exactly one entry, keyed by `SPECIAL_KEY`, whose value is CID text.
struct LinkVisitor;

impl<'de> de::Visitor<'de> for LinkVisitor {
  type Value = Cid;

  fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt.write_str("an IPLD link of the form {\"/\": \"<cid>\"}")
  }

  fn visit_map<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
  where V: de::MapAccess<'de> {
    let mut link: Option<String> = None;
    while let Some(key) = visitor.next_key::<String>()? {
      if key != SPECIAL_KEY || link.is_some() {
        return Err(de::Error::custom(format!("unexpected key {:?} in link", key)));
      }
      link = Some(visitor.next_value()?);
    }
    let link = link.ok_or_else(|| de::Error::missing_field(SPECIAL_KEY))?;
    parse::from_str(&link).map_err(de::Error::custom)
  }
}

impl<'de> Deserialize<'de> for Cid {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where D: de::Deserializer<'de> {
    deserializer.deserialize_map(LinkVisitor)
  }
}

fn invalid(err: serde_json::Error) -> Error { Error::InvalidIpldJson(err.to_string()) }

/// # Errors
///
/// Returns `Error::InvalidIpldJson` if serialization fails.
pub fn to_value(cid: &Cid) -> crate::Result<Value> {
  serde_json::to_value(cid).map_err(invalid)
}

/// # Errors
///
/// Returns `Error::InvalidIpldJson` unless `value` is a single-entry object
/// `{"/": "<cid>"}` holding valid CID text.
pub fn from_value(value: Value) -> crate::Result<Cid> {
  serde_json::from_value(value).map_err(invalid)
}

/// # Errors
///
/// Returns `Error::InvalidIpldJson` if serialization fails.
pub fn to_string(cid: &Cid) -> crate::Result<String> {
  serde_json::to_string(cid).map_err(invalid)
}

/// # Errors
///
/// Fails like [`from_value`], and on text that is not JSON.
pub fn from_str(text: &str) -> crate::Result<Cid> {
  serde_json::from_str(text).map_err(invalid)
}
