//! Little-endian scalar marshalling over raw byte buffers.
//!
//! Every multi-byte value crossing the module boundary is little-endian
//! regardless of host architecture. These helpers operate on plain byte
//! slices so they can serve guest linear memory and host-side staging
//! buffers alike; callers are responsible for bounds (out-of-range offsets
//! panic, as with any slice indexing).

use std::borrow::Cow;

/// Writes a 32-bit signed integer at `offset` in little-endian order.
///
/// # Panics
/// Panics if `offset + 4` exceeds the buffer length.
pub fn write_i32_le(buffer: &mut [u8], offset: usize, value: i32) {
    buffer[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Reads the 32-bit signed integer stored little-endian at `offset`.
///
/// # Panics
/// Panics if `offset + 4` exceeds the buffer length.
pub fn read_i32_le(buffer: &[u8], offset: usize) -> i32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buffer[offset..offset + 4]);
    i32::from_le_bytes(raw)
}

/// Writes a 32-bit unsigned integer at `offset` in little-endian order.
pub fn write_u32_le(buffer: &mut [u8], offset: usize, value: u32) {
    buffer[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Reads the 32-bit unsigned integer stored little-endian at `offset`.
pub fn read_u32_le(buffer: &[u8], offset: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buffer[offset..offset + 4]);
    u32::from_le_bytes(raw)
}

/// Writes a 16-bit unsigned integer at `offset` in little-endian order.
pub fn write_u16_le(buffer: &mut [u8], offset: usize, value: u16) {
    buffer[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

/// Writes a 64-bit unsigned integer at `offset` in little-endian order.
pub fn write_u64_le(buffer: &mut [u8], offset: usize, value: u64) {
    buffer[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}

/// Builds host text from a guest byte range, replacing invalid UTF-8 with
/// the replacement character. Console messages are expected to be ASCII in
/// practice, so the borrowed variant is the common case.
pub fn lossy_text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
