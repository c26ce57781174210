//! Recording [`PlatformHost`] used by the unit tests.
//!
//! Serves configured WADs and saves, records everything the adapter sends
//! across the boundary, and exposes override knobs for making the "host"
//! break the two-phase contracts on purpose. Size overrides must only
//! over-promise (the adapter sizes its buffers from them).

use std::collections::HashMap;

use crate::platform::PlatformHost;

#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub wads: Vec<Vec<u8>>,
    pub wad_count_override: Option<i32>,
    pub wad_total_override: Option<i32>,
    pub wad_lengths_override: Option<Vec<i32>>,
    pub saves: HashMap<i32, Vec<u8>>,
    pub save_size_override: Option<i32>,
    pub persisted_override: Option<i32>,
    pub short_read_by: usize,
    pub inits: Vec<(i32, i32)>,
    pub frames: Vec<Vec<u8>>,
    pub errors: Vec<String>,
    pub clock: i64,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wads(wads: Vec<Vec<u8>>) -> Self {
        Self {
            wads,
            ..Self::default()
        }
    }
}

impl PlatformHost for RecordingHost {
    fn on_game_init(&mut self, width: i32, height: i32) {
        self.inits.push((width, height));
    }

    fn wad_sizes(&mut self) -> (i32, i32) {
        let count = self
            .wad_count_override
            .unwrap_or(self.wads.len() as i32);
        let total = self
            .wad_total_override
            .unwrap_or_else(|| self.wads.iter().map(|wad| wad.len() as i32).sum());
        (count, total)
    }

    fn read_wads(&mut self, data: &mut [u8], lengths: &mut [i32]) {
        let mut offset = 0;
        for (index, wad) in self.wads.iter().enumerate() {
            data[offset..offset + wad.len()].copy_from_slice(wad);
            offset += wad.len();
            lengths[index] = wad.len() as i32;
        }
        if let Some(overrides) = &self.wad_lengths_override {
            lengths.copy_from_slice(overrides);
        }
    }

    fn draw_frame(&mut self, buffer: &[u8]) {
        self.frames.push(buffer.to_vec());
    }

    fn time_in_milliseconds(&mut self) -> i64 {
        self.clock += 7;
        self.clock
    }

    fn size_of_save_game(&mut self, slot: i32) -> i32 {
        if let Some(size) = self.save_size_override {
            return size;
        }
        self.saves.get(&slot).map_or(0, |bytes| bytes.len() as i32)
    }

    fn read_save_game(&mut self, slot: i32, dest: &mut [u8]) -> i32 {
        let Some(bytes) = self.saves.get(&slot) else {
            return 0;
        };
        let count = bytes
            .len()
            .min(dest.len())
            .saturating_sub(self.short_read_by);
        dest[..count].copy_from_slice(&bytes[..count]);
        count as i32
    }

    fn write_save_game(&mut self, slot: i32, data: &[u8]) -> i32 {
        self.saves.insert(slot, data.to_vec());
        self.persisted_override.unwrap_or(data.len() as i32)
    }

    fn log_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
