use doombox_abi::codec::lossy_text;

/// Capacity of each per-descriptor line buffer, in bytes.
///
/// A line longer than this is force-flushed in capacity-sized pieces rather
/// than grown without bound.
pub const LINE_CAPACITY: usize = 1024;

/// Fixed-capacity accumulator for one console line.
///
/// Bytes are collected until the owner sees a newline or the buffer fills;
/// either way [`take_line`](LineBuffer::take_line) hands the accumulated text
/// over and resets the buffer. The newline itself is never stored.
#[derive(Debug)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl LineBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True once another push would exceed the fixed capacity.
    pub fn is_full(&self) -> bool {
        self.bytes.len() >= self.capacity
    }

    /// Appends one byte. The owner must flush a full buffer first.
    pub fn push(&mut self, byte: u8) {
        debug_assert!(!self.is_full());
        self.bytes.push(byte);
    }

    /// Takes the buffered bytes as text and resets the buffer.
    ///
    /// Invalid UTF-8 is replaced rather than refused; the engine prints
    /// plain ASCII but nothing enforces that.
    pub fn take_line(&mut self) -> String {
        let line = lossy_text(&self.bytes).into_owned();
        self.bytes.clear();
        line
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(LINE_CAPACITY)
    }
}
