//! Save-game readers and writers.

use thiserror::Error;

use crate::platform::PlatformHost;

/// Starting capacity of a writer's buffer, sized for typical engine saves.
const INITIAL_WRITER_CAPACITY: usize = 4096;

/// The host persisted fewer bytes than the writer flushed. A zero count is
/// the host's way of saying saving is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("save slot {slot}: host persisted {persisted} of {expected} bytes")]
pub struct ShortPersist {
    pub slot: i32,
    pub expected: usize,
    pub persisted: usize,
}

/// Sequential reader over one slot's save bytes.
///
/// Produced by the size-then-copy protocol: the slot's full contents are
/// copied into an exact-size buffer up front, then read out sequentially.
#[derive(Debug)]
pub struct SaveReader {
    data: Vec<u8>,
    position: usize,
}

impl SaveReader {
    /// Runs the read protocol for `slot`. Returns `None` when the host
    /// reports the slot absent, and also (after logging) when the host
    /// breaks the contract by copying fewer bytes than it promised.
    pub fn open<H: PlatformHost>(host: &mut H, slot: i32) -> Option<SaveReader> {
        let size = host.size_of_save_game(slot);
        if size == 0 {
            return None;
        }
        if size < 0 {
            host.log_error(&format!(
                "save slot {slot}: host reported a negative size ({size}); treating the save as absent"
            ));
            return None;
        }

        let mut data = vec![0u8; size as usize];
        let copied = host.read_save_game(slot, &mut data);
        if copied != size {
            host.log_error(&format!(
                "save slot {slot}: host copied {copied} of {size} bytes; treating the save as unreadable"
            ));
            return None;
        }
        Some(SaveReader { data, position: 0 })
    }

    /// Copies the next bytes into `dest`, returning how many were copied;
    /// short only when the remaining data is shorter than `dest`.
    pub fn read(&mut self, dest: &mut [u8]) -> usize {
        let remaining = self.data.len() - self.position;
        let count = remaining.min(dest.len());
        dest[..count].copy_from_slice(&self.data[self.position..self.position + count]);
        self.position += count;
        count
    }

    pub fn bytes_read_so_far(&self) -> usize {
        self.position
    }

    /// Consumes the reader, releasing its buffer. Equivalent to dropping it.
    pub fn close(self) {}
}

/// Append-only growable save buffer for one slot.
///
/// Nothing reaches the host until [`close`](Self::close) flushes the whole
/// buffer through the save-write import.
#[derive(Debug)]
pub struct SaveWriter {
    slot: i32,
    data: Vec<u8>,
}

impl SaveWriter {
    pub fn new(slot: i32) -> SaveWriter {
        Self::with_capacity(slot, INITIAL_WRITER_CAPACITY)
    }

    pub fn with_capacity(slot: i32, capacity: usize) -> SaveWriter {
        SaveWriter {
            slot,
            data: Vec::with_capacity(capacity),
        }
    }

    /// Appends `bytes`, growing the buffer per [`grown_capacity`] when they
    /// do not fit.
    pub fn write(&mut self, bytes: &[u8]) {
        let needed = self.data.len() + bytes.len();
        if needed > self.data.capacity() {
            let target = grown_capacity(self.data.capacity(), needed);
            self.data.reserve_exact(target - self.data.len());
        }
        self.data.extend_from_slice(bytes);
    }

    pub fn bytes_written_so_far(&self) -> usize {
        self.data.len()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn slot(&self) -> i32 {
        self.slot
    }

    /// Flushes the buffer to the host's save-write import. Fails when the
    /// host persists fewer bytes than provided, logging whether that looks
    /// like a short persist or saving being unsupported altogether.
    pub fn close<H: PlatformHost>(self, host: &mut H) -> Result<usize, ShortPersist> {
        let persisted = host.write_save_game(self.slot, &self.data);
        let persisted = if persisted < 0 { 0 } else { persisted as usize };
        if persisted != self.data.len() {
            if persisted == 0 {
                host.log_error(&format!(
                    "save slot {}: host persisted no bytes; saving appears to be unsupported",
                    self.slot
                ));
            } else {
                host.log_error(&format!(
                    "save slot {}: host persisted {} of {} bytes",
                    self.slot,
                    persisted,
                    self.data.len()
                ));
            }
            return Err(ShortPersist {
                slot: self.slot,
                expected: self.data.len(),
                persisted,
            });
        }
        Ok(persisted)
    }
}

/// Growth policy: at least half again the current capacity, or exactly
/// enough to fit the pending write, whichever is larger.
fn grown_capacity(current: usize, needed: usize) -> usize {
    let half_again = current + current / 2;
    half_again.max(needed)
}
