//! The contract a presentation layer satisfies, plus stand-ins for hosts
//! that have none.

use doombox_abi::{ConsoleSink, KeyLabel};

/// Input gathered by the frontend since the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key went down, named by its semantic label.
    KeyDown(KeyLabel),
    /// A key came back up.
    KeyUp(KeyLabel),
    /// The user asked to close the host.
    Quit,
}

/// What the out-of-scope UI layer must provide.
///
/// The driver announces the frame format once, hands over one finished frame
/// per tick, and drains input after every tick. Pixels arrive row-major from
/// the top-left, four bytes per pixel in blue-green-red-alpha order.
pub trait Frontend {
    fn on_game_init(&mut self, width: i32, height: i32);

    fn draw_frame(&mut self, width: i32, height: i32, pixels: &[u8]);

    fn poll_input(&mut self) -> Vec<InputEvent>;
}

/// Frontend for hosts without a display: frames are counted and dropped,
/// input never arrives.
#[derive(Debug, Default)]
pub struct HeadlessFrontend {
    frames: u64,
}

impl HeadlessFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames received so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Frontend for HeadlessFrontend {
    fn on_game_init(&mut self, width: i32, height: i32) {
        tracing::info!(width, height, "engine announced its frame format");
    }

    fn draw_frame(&mut self, width: i32, height: i32, _pixels: &[u8]) {
        self.frames += 1;
        tracing::trace!(width, height, frame = self.frames, "frame dropped (headless)");
    }

    fn poll_input(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// Console sink that forwards engine lines to the host's own log stream.
#[derive(Debug, Default)]
pub struct LogConsole;

impl ConsoleSink for LogConsole {
    fn info(&mut self, line: &str) {
        tracing::info!(target: "doombox::console", "{line}");
    }

    fn error(&mut self, line: &str) {
        tracing::error!(target: "doombox::console", "{line}");
    }
}
