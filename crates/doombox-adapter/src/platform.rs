//! The engine-facing platform facade and its host seam.

use doombox_abi::{FRAME_HEIGHT, FRAME_WIDTH};

use crate::keys::{KeyEvent, KeyStates};
use crate::saves::{SaveReader, SaveWriter, ShortPersist};
use crate::wads::WadBundle;

/// The module's import surface as seen from inside the module.
///
/// Offsets in the wire-level imports become slices here: from the guest's
/// point of view an offset into linear memory is just a borrow of its own
/// address space. The error channel feeds the guest's standard-error path,
/// which the host surfaces through its console sink.
pub trait PlatformHost {
    /// `loading.onGameInit`: announce the fixed frame geometry.
    fn on_game_init(&mut self, width: i32, height: i32);

    /// `loading.wadSizes`: returns (archive count, total bytes across all
    /// archives). A zero count means "no custom archives, use the default".
    fn wad_sizes(&mut self) -> (i32, i32);

    /// `loading.readWads`: fill `data` with every archive's bytes
    /// back-to-back in load order, and `lengths` with one byte count per
    /// archive. Only called after `wad_sizes` reported a nonzero count.
    fn read_wads(&mut self, data: &mut [u8], lengths: &mut [i32]);

    /// `ui.drawFrame`: one finished frame, unmodified engine bytes.
    fn draw_frame(&mut self, buffer: &[u8]);

    /// `runtimeControl.timeInMilliseconds`: monotonically non-decreasing.
    fn time_in_milliseconds(&mut self) -> i64;

    /// `gameSaving.sizeOfSaveGame`: byte size of the slot, 0 when absent.
    fn size_of_save_game(&mut self, slot: i32) -> i32;

    /// `gameSaving.readSaveGame`: copy the slot's bytes into `dest`,
    /// returning how many were copied.
    fn read_save_game(&mut self, slot: i32, dest: &mut [u8]) -> i32;

    /// `gameSaving.writeSaveGame`: persist `data` for the slot, returning
    /// how many bytes were persisted; 0 signals that saving is unsupported.
    fn write_save_game(&mut self, slot: i32, data: &[u8]) -> i32;

    /// One line of diagnostic text bound for the error console.
    fn log_error(&mut self, message: &str);
}

/// Implements the engine's platform callbacks over a [`PlatformHost`].
///
/// Owns all adapter state (currently the key cache); one value per module
/// instance, constructed at startup.
#[derive(Debug)]
pub struct Platform<H> {
    host: H,
    keys: KeyStates,
}

impl<H: PlatformHost> Platform<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            keys: KeyStates::new(),
        }
    }

    /// One-time engine startup callback.
    pub fn init(&mut self) {
        self.host.on_game_init(FRAME_WIDTH, FRAME_HEIGHT);
    }

    /// Runs the two-phase WAD loading protocol.
    pub fn acquire_wads(&mut self) -> WadBundle {
        WadBundle::acquire(&mut self.host)
    }

    /// Forwards a finished frame to the host, unmodified.
    pub fn draw_frame(&mut self, buffer: &[u8]) {
        self.host.draw_frame(buffer);
    }

    /// Relays the next un-communicated key change, if any.
    pub fn poll_key_event(&mut self) -> Option<KeyEvent> {
        self.keys.poll_change()
    }

    /// Records a key-down report; out-of-range codes are logged and dropped.
    pub fn report_key_down(&mut self, key_code: i32) {
        if !self.keys.report_down(key_code) {
            self.host
                .log_error(&format!("ignoring key-down report for code {key_code}, outside [0, 255]"));
        }
    }

    /// Records a key-up report; out-of-range codes are logged and dropped.
    pub fn report_key_up(&mut self, key_code: i32) {
        if !self.keys.report_up(key_code) {
            self.host
                .log_error(&format!("ignoring key-up report for code {key_code}, outside [0, 255]"));
        }
    }

    /// The engine only ever sleeps for one millisecond while busy-waiting on
    /// the clock, so sleeping is a no-op; any other duration is unexpected.
    pub fn sleep_ms(&mut self, milliseconds: u32) {
        if milliseconds != 1 {
            self.host
                .log_error(&format!("unexpected sleep request of {milliseconds} ms ignored"));
        }
    }

    /// Engine time in milliseconds. The engine counts ticks in 32 bits; the
    /// wider import value is truncated.
    pub fn ticks_ms(&mut self) -> u32 {
        self.host.time_in_milliseconds() as u32
    }

    /// The host learns the title out-of-band; nothing crosses the boundary.
    pub fn set_window_title(&mut self, _title: &str) {}

    /// Runs the size-then-copy read protocol for one slot.
    pub fn open_save_reader(&mut self, slot: i32) -> Option<SaveReader> {
        SaveReader::open(&mut self.host, slot)
    }

    /// Starts a growable save buffer for one slot.
    pub fn open_save_writer(&mut self, slot: i32) -> SaveWriter {
        SaveWriter::new(slot)
    }

    /// Flushes a finished save buffer to the host.
    pub fn close_save_writer(&mut self, writer: SaveWriter) -> Result<usize, ShortPersist> {
        writer.close(&mut self.host)
    }

    /// Demo recording never triggers in the packaged module; the flags that
    /// would enable it are never passed.
    pub fn demo_recorded(&mut self, _name: &str) {}

    /// Screenshots never trigger in the packaged module, as above.
    pub fn screenshot_taken(&mut self, _name: &str) {}
}
