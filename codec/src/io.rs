//! Length-prefixed big-endian field primitives.
//!
//! Every integer on the wire is big-endian. Text fields are an 8-byte
//! unsigned length followed by that many UTF-8 bytes; booleans are a single
//! byte. These helpers are shared by the subject-side encoder and the
//! consumer-side decoder so both halves agree on framing byte-for-byte.
//!
//! Readers take a `field` label that names what was being read, so truncation
//! and text errors point at the exact field instead of a byte offset.

use std::io::{ErrorKind, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{CodecError, Result};

/// Writes an 8-byte unsigned big-endian integer.
pub fn write_u64<W: Write + ?Sized>(to: &mut W, value: u64) -> Result<()> {
    to.write_u64::<BigEndian>(value)?;
    Ok(())
}

/// Writes an 8-byte signed big-endian integer.
pub fn write_i64<W: Write + ?Sized>(to: &mut W, value: i64) -> Result<()> {
    to.write_i64::<BigEndian>(value)?;
    Ok(())
}

/// Writes an 8-byte IEEE-754 double, big-endian.
pub fn write_f64<W: Write + ?Sized>(to: &mut W, value: f64) -> Result<()> {
    to.write_f64::<BigEndian>(value)?;
    Ok(())
}

/// Writes a boolean as a single 0/1 byte.
pub fn write_bool<W: Write + ?Sized>(to: &mut W, value: bool) -> Result<()> {
    to.write_u8(if value { 1 } else { 0 })?;
    Ok(())
}

/// Writes a length-prefixed UTF-8 string.
pub fn write_string<W: Write + ?Sized>(to: &mut W, value: &str) -> Result<()> {
    write_u64(to, value.len() as u64)?;
    to.write_all(value.as_bytes())?;
    Ok(())
}

/// Reads an 8-byte unsigned big-endian integer.
pub fn read_u64<R: Read>(from: &mut R, field: &'static str) -> Result<u64> {
    from.read_u64::<BigEndian>().map_err(|e| eof(e, field))
}

/// Reads an 8-byte signed big-endian integer.
pub fn read_i64<R: Read>(from: &mut R, field: &'static str) -> Result<i64> {
    from.read_i64::<BigEndian>().map_err(|e| eof(e, field))
}

/// Reads an 8-byte IEEE-754 double, big-endian.
pub fn read_f64<R: Read>(from: &mut R, field: &'static str) -> Result<f64> {
    from.read_f64::<BigEndian>().map_err(|e| eof(e, field))
}

/// Reads a single byte as a boolean. Any nonzero value is `true`.
pub fn read_bool<R: Read>(from: &mut R, field: &'static str) -> Result<bool> {
    let byte = from.read_u8().map_err(|e| eof(e, field))?;
    Ok(byte != 0)
}

/// Reads a length-prefixed UTF-8 string.
pub fn read_string<R: Read>(from: &mut R, field: &'static str) -> Result<String> {
    let bytes = read_blob(from, field)?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidText(field))
}

/// Reads a length-prefixed raw byte blob.
///
/// The blob is accumulated through [`Read::take`] rather than preallocated
/// from the declared length, so a corrupt length prefix surfaces as
/// [`CodecError::Truncated`] instead of an oversized allocation.
pub fn read_blob<R: Read>(from: &mut R, field: &'static str) -> Result<Vec<u8>> {
    let declared = read_u64(from, field)?;
    let mut buf = Vec::new();
    let got = from.take(declared).read_to_end(&mut buf)?;
    if got as u64 != declared {
        return Err(CodecError::Truncated(field));
    }
    Ok(buf)
}

fn eof(err: std::io::Error, field: &'static str) -> CodecError {
    if err.kind() == ErrorKind::UnexpectedEof {
        CodecError::Truncated(field)
    } else {
        CodecError::Io(err)
    }
}
