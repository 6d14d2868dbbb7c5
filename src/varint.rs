//! Unsigned varints as used throughout the multiformats: 7 bits per byte, least
//! significant group first, high bit set on every byte but the last.

use std::io::Read;

use unsigned_varint::{
  decode,
  encode as varint_encode,
};

use crate::error::{
  Error,
  Result,
};

/// Longest encoding of a `u64`.
pub const MAX_LEN: usize = 10;

/// Encodes `value` as an unsigned varint.
pub fn encode(value: u64) -> Vec<u8> {
  let mut buf = varint_encode::u64_buffer();
  varint_encode::u64(value, &mut buf).to_vec()
}

/// Appends the varint encoding of `value` to `out`.
pub fn write(value: u64, out: &mut Vec<u8>) {
  let mut buf = varint_encode::u64_buffer();
  out.extend_from_slice(varint_encode::u64(value, &mut buf));
}

/// Number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u64) -> usize {
  let mut buf = varint_encode::u64_buffer();
  varint_encode::u64(value, &mut buf).len()
}

/// Decodes the varint at the front of `bytes` and returns it together with the
/// bytes that follow it.
///
/// # Errors
///
/// Returns `Error::MalformedVarint` if `bytes` ends before a terminating byte,
/// if the value does not fit into 64 bits, or if the encoding is not minimal.
pub fn decode(bytes: &[u8]) -> Result<(u64, &[u8])> {
  Ok(decode::u64(bytes)?)
}

/// Reads a single varint from `r` one byte at a time, appending every byte it
/// consumes to `consumed`.
///
/// # Errors
///
/// Returns `Error::UnexpectedEof` if the reader runs dry before the terminating
/// byte and `Error::MalformedVarint` if no terminating byte shows up within
/// [`MAX_LEN`] bytes.
pub fn read<R: Read>(r: &mut R, consumed: &mut Vec<u8>) -> Result<u64> {
  let start = consumed.len();
  let mut byte = [0u8; 1];
  loop {
    r.read_exact(&mut byte)?;
    consumed.push(byte[0]);
    if decode::is_last(byte[0]) {
      break;
    }
    if consumed.len() - start >= MAX_LEN {
      return Err(Error::MalformedVarint(decode::Error::Overflow));
    }
  }
  let (value, _) = decode(&consumed[start..])?;
  Ok(value)
}
