//! Big-endian wire primitives shared by the definition codecs.
//!
//! Every multi-byte integer travels in network order. Strings carry a
//! `u16` byte-length prefix, large blobs a `u32` prefix. Fractional
//! values are fixed-point: scaled by 1000 and stored as `i32`, which
//! pins the resolution to one-thousandth of a unit.

use glam::Vec3;
use std::io::{Read, Write};
use thiserror::Error;

/// Scale applied to fixed-point values on the wire.
const FIXED_POINT_SCALE: f32 = 1000.0;

/// Errors raised by the wire primitives.
#[derive(Debug, Error)]
pub enum WireError {
    /// Underlying reader/writer failure, including truncated input.
    #[error("wire i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A length-prefixed string held invalid UTF-8.
    #[error("string payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// A string does not fit its `u16` length prefix.
    #[error("string of {0} bytes exceeds the u16 length prefix")]
    StringTooLong(usize),
    /// A blob does not fit its `u32` length prefix.
    #[error("blob of {0} bytes exceeds the u32 length prefix")]
    BlobTooLong(usize),
}

/// Write a single byte.
pub fn write_u8<W: Write>(w: &mut W, value: u8) -> Result<(), WireError> {
    w.write_all(&[value])?;
    Ok(())
}

/// Read a single byte.
pub fn read_u8<R: Read>(r: &mut R) -> Result<u8, WireError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Write a `u16` in network order.
pub fn write_u16<W: Write>(w: &mut W, value: u16) -> Result<(), WireError> {
    w.write_all(&value.to_be_bytes())?;
    Ok(())
}

/// Read a `u16` in network order.
pub fn read_u16<R: Read>(r: &mut R) -> Result<u16, WireError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

/// Write a `u32` in network order.
pub fn write_u32<W: Write>(w: &mut W, value: u32) -> Result<(), WireError> {
    w.write_all(&value.to_be_bytes())?;
    Ok(())
}

/// Read a `u32` in network order.
pub fn read_u32<R: Read>(r: &mut R) -> Result<u32, WireError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Write an `i32` in network order.
pub fn write_i32<W: Write>(w: &mut W, value: i32) -> Result<(), WireError> {
    w.write_all(&value.to_be_bytes())?;
    Ok(())
}

/// Read an `i32` in network order.
pub fn read_i32<R: Read>(r: &mut R) -> Result<i32, WireError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

/// Write a boolean as a 0/1 byte.
pub fn write_bool<W: Write>(w: &mut W, value: bool) -> Result<(), WireError> {
    write_u8(w, value as u8)
}

/// Read a boolean byte. Any non-zero value counts as true.
pub fn read_bool<R: Read>(r: &mut R) -> Result<bool, WireError> {
    Ok(read_u8(r)? != 0)
}

/// Write a fixed-point value (thousandths resolution).
pub fn write_f1000<W: Write>(w: &mut W, value: f32) -> Result<(), WireError> {
    write_i32(w, (value * FIXED_POINT_SCALE).round() as i32)
}

/// Read a fixed-point value (thousandths resolution).
pub fn read_f1000<R: Read>(r: &mut R) -> Result<f32, WireError> {
    Ok(read_i32(r)? as f32 / FIXED_POINT_SCALE)
}

/// Write a 3D vector as three fixed-point coordinates.
pub fn write_v3f1000<W: Write>(w: &mut W, value: Vec3) -> Result<(), WireError> {
    write_f1000(w, value.x)?;
    write_f1000(w, value.y)?;
    write_f1000(w, value.z)
}

/// Read a 3D vector of three fixed-point coordinates.
pub fn read_v3f1000<R: Read>(r: &mut R) -> Result<Vec3, WireError> {
    let x = read_f1000(r)?;
    let y = read_f1000(r)?;
    let z = read_f1000(r)?;
    Ok(Vec3::new(x, y, z))
}

/// Write a `u16`-length-prefixed string.
pub fn write_string16<W: Write>(w: &mut W, value: &str) -> Result<(), WireError> {
    if value.len() > u16::MAX as usize {
        return Err(WireError::StringTooLong(value.len()));
    }
    write_u16(w, value.len() as u16)?;
    w.write_all(value.as_bytes())?;
    Ok(())
}

/// Read a `u16`-length-prefixed string.
pub fn read_string16<R: Read>(r: &mut R) -> Result<String, WireError> {
    Ok(String::from_utf8(read_bytes16(r)?)?)
}

/// Write a `u16`-length-prefixed byte slice.
pub fn write_bytes16<W: Write>(w: &mut W, bytes: &[u8]) -> Result<(), WireError> {
    if bytes.len() > u16::MAX as usize {
        return Err(WireError::StringTooLong(bytes.len()));
    }
    write_u16(w, bytes.len() as u16)?;
    w.write_all(bytes)?;
    Ok(())
}

/// Read a `u16`-length-prefixed byte vector.
pub fn read_bytes16<R: Read>(r: &mut R) -> Result<Vec<u8>, WireError> {
    let len = read_u16(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Write a `u32`-length-prefixed byte slice ("long string" framing).
pub fn write_bytes32<W: Write>(w: &mut W, bytes: &[u8]) -> Result<(), WireError> {
    if bytes.len() > u32::MAX as usize {
        return Err(WireError::BlobTooLong(bytes.len()));
    }
    write_u32(w, bytes.len() as u32)?;
    w.write_all(bytes)?;
    Ok(())
}

/// Read a `u32`-length-prefixed byte vector ("long string" framing).
///
/// Reads incrementally so a corrupt length prefix cannot force a huge
/// up-front allocation.
pub fn read_bytes32<R: Read>(r: &mut R) -> Result<Vec<u8>, WireError> {
    let len = read_u32(r)? as u64;
    let mut buf = Vec::new();
    r.take(len).read_to_end(&mut buf)?;
    if (buf.len() as u64) != len {
        return Err(WireError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "length-prefixed blob truncated",
        )));
    }
    Ok(buf)
}
