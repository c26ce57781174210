//! Double-buffered key-state cache.

use doombox_abi::MAX_KEY_CODE;

const KEY_TABLE_LEN: usize = MAX_KEY_CODE as usize + 1;

/// One key-state change surfaced to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub pressed: bool,
    pub key_code: u8,
}

/// Tracks which keys the embedder reports as held, and which of those states
/// have already been communicated to the engine.
///
/// Reports mutate only the reported table. Polling scans both tables in
/// increasing key-code order and relays the first difference, so each state
/// change is surfaced exactly once and strictly in key-code order, even when
/// several keys changed between polls.
#[derive(Debug, Clone)]
pub struct KeyStates {
    reported: [bool; KEY_TABLE_LEN],
    communicated: [bool; KEY_TABLE_LEN],
}

impl KeyStates {
    /// All keys start in the "not pressed" state on both sides.
    pub fn new() -> Self {
        Self {
            reported: [false; KEY_TABLE_LEN],
            communicated: [false; KEY_TABLE_LEN],
        }
    }

    /// Records a "pressed" report. Returns false when the code falls outside
    /// the table; the caller is expected to log and drop those. Repeats
    /// without an intervening release are idempotent.
    pub fn report_down(&mut self, key_code: i32) -> bool {
        match table_index(key_code) {
            Some(index) => {
                self.reported[index] = true;
                true
            }
            None => false,
        }
    }

    /// Records a "released" report; same contract as [`report_down`](Self::report_down).
    pub fn report_up(&mut self, key_code: i32) -> bool {
        match table_index(key_code) {
            Some(index) => {
                self.reported[index] = false;
                true
            }
            None => false,
        }
    }

    /// Relays the lowest-coded key whose reported state differs from the
    /// last-communicated state, marking it communicated. Returns `None` when
    /// both tables agree everywhere.
    pub fn poll_change(&mut self) -> Option<KeyEvent> {
        for index in 0..KEY_TABLE_LEN {
            if self.reported[index] != self.communicated[index] {
                self.communicated[index] = self.reported[index];
                return Some(KeyEvent {
                    pressed: self.reported[index],
                    key_code: index as u8,
                });
            }
        }
        None
    }
}

impl Default for KeyStates {
    fn default() -> Self {
        Self::new()
    }
}

fn table_index(key_code: i32) -> Option<usize> {
    if (0..=MAX_KEY_CODE).contains(&key_code) {
        Some(key_code as usize)
    } else {
        None
    }
}
