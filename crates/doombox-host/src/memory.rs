//! Bounds-checked view over guest linear memory.

use doombox_abi::codec;

use crate::error::HostError;

/// A borrowed window onto the instance's linear memory.
///
/// Views are resolved fresh from the context for every operation, so a grow
/// performed by the guest between calls can never leave a stale slice in
/// host hands. All multi-byte accesses are little-endian. Every access is
/// range-checked against the current memory size; the `what` label names the
/// violating structure in the resulting error.
pub struct GuestMemory<'m> {
    data: &'m mut [u8],
}

impl<'m> GuestMemory<'m> {
    pub(crate) fn new(data: &'m mut [u8]) -> Self {
        Self { data }
    }

    /// Current memory size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    fn check(&self, what: &'static str, offset: u32, length: usize) -> Result<usize, HostError> {
        let start = offset as usize;
        if start + length > self.data.len() {
            return Err(HostError::MemoryRange {
                what,
                offset: start,
                length,
                size: self.data.len(),
            });
        }
        Ok(start)
    }

    /// Borrows `length` bytes starting at `offset`.
    pub fn bytes(&self, what: &'static str, offset: u32, length: usize) -> Result<&[u8], HostError> {
        let start = self.check(what, offset, length)?;
        Ok(&self.data[start..start + length])
    }

    /// Copies `bytes` into guest memory at `offset`.
    pub fn write_bytes(
        &mut self,
        what: &'static str,
        offset: u32,
        bytes: &[u8],
    ) -> Result<(), HostError> {
        let start = self.check(what, offset, bytes.len())?;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Reads the little-endian i32 at `offset`.
    pub fn read_i32(&self, what: &'static str, offset: u32) -> Result<i32, HostError> {
        let start = self.check(what, offset, 4)?;
        Ok(codec::read_i32_le(self.data, start))
    }

    /// Writes `value` little-endian at `offset`.
    pub fn write_i32(&mut self, what: &'static str, offset: u32, value: i32) -> Result<(), HostError> {
        let start = self.check(what, offset, 4)?;
        codec::write_i32_le(self.data, start, value);
        Ok(())
    }

    /// Builds host text from the guest byte range, lossily.
    pub fn text(&self, what: &'static str, offset: u32, length: u32) -> Result<String, HostError> {
        let bytes = self.bytes(what, offset, length as usize)?;
        Ok(codec::lossy_text(bytes).into_owned())
    }
}
