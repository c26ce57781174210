//! Shared fixture: a small WAT module speaking the engine's boundary
//! protocols, plus recording collaborators the suites assert against.
//!
//! The fixture mirrors how the packaged engine behaves at the boundary.
//! `initGame` announces an 8x4 frame, negotiates archives, and records what
//! it saw in exported mutable globals; tick bodies vary per scenario so each
//! test drives exactly the protocol it checks. Everything the guest observes
//! comes back out through globals, because the host API deliberately exposes
//! no other window into guest memory.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use doombox_abi::ConsoleSink;
use doombox_host::{Clock, Frontend, InputEvent};

/// Key-code globals the fixture exports, with the engine's real values.
pub const KEY_VALUES: &[(&str, i32)] = &[
    ("KEY_ALT", 184),
    ("KEY_BACKSPACE", 127),
    ("KEY_DOWNARROW", 175),
    ("KEY_ENTER", 13),
    ("KEY_ESCAPE", 27),
    ("KEY_FIRE", 163),
    ("KEY_LEFTARROW", 172),
    ("KEY_RIGHTARROW", 174),
    ("KEY_SHIFT", 182),
    ("KEY_STRAFE_L", 160),
    ("KEY_STRAFE_R", 161),
    ("KEY_TAB", 9),
    ("KEY_UPARROW", 173),
    ("KEY_USE", 162),
];

/// `initGame` body: announce the frame format, negotiate archives, record
/// the negotiation results in globals. Mirrors the engine's startup order.
const INIT_ANNOUNCE: &str = r#"
    (call $onGameInit (i32.const 8) (i32.const 4))
    (call $wadSizes (i32.const 16) (i32.const 20))
    (global.set $wadCount (i32.load (i32.const 16)))
    (global.set $wadTotal (i32.load (i32.const 20)))
    (if (i32.gt_s (global.get $wadCount) (i32.const 0))
      (then
        (call $readWads (i32.const 4096) (i32.const 64))
        (global.set $archiveLen0 (i32.load (i32.const 64)))
        (global.set $wadHead (i32.load (i32.const 4096)))))
    (if (i32.gt_s (global.get $wadCount) (i32.const 1))
      (then (global.set $archiveLen1 (i32.load (i32.const 68)))))
"#;

/// Default tick: hand one frame to the host.
pub const TICK_DRAW: &str = "    (call $drawFrame (i32.const 1024))";

/// Tick that requests process exit with code 7.
pub const TICK_EXIT_SEVEN: &str = "    (call $procExit (i32.const 7))";

/// Tick that emits one line on each console channel.
pub const TICK_CONSOLE: &str = r#"
    (call $onInfoMessage (i32.const 512) (i32.const 13))
    (call $onErrorMessage (i32.const 560) (i32.const 14))
"#;

/// Tick that samples the host clock into `clockLow`.
pub const TICK_CLOCK: &str =
    "    (global.set $clockLow (i32.wrap_i64 (call $timeInMilliseconds)))";

/// Tick that writes slot 0, then sizes and reads it back.
pub const TICK_SAVE_ROUND_TRIP: &str = r#"
    (global.set $writeAck (call $writeSaveGame (i32.const 0) (i32.const 2048) (i32.const 7)))
    (global.set $saveSize (call $sizeOfSaveGame (i32.const 0)))
    (global.set $readLen (call $readSaveGame (i32.const 0) (i32.const 3072)))
    (global.set $saveHead (i32.load (i32.const 3072)))
"#;

/// Tick that only probes slot 0, for persistence-across-instances checks.
pub const TICK_SAVE_PROBE: &str = r#"
    (global.set $saveSize (call $sizeOfSaveGame (i32.const 0)))
    (global.set $readLen (call $readSaveGame (i32.const 0) (i32.const 3072)))
    (global.set $saveHead (i32.load (i32.const 3072)))
"#;

/// Tick probing an empty slot and handing over a negative slot.
pub const TICK_SAVE_EDGE_CASES: &str = r#"
    (global.set $saveSize (call $sizeOfSaveGame (i32.const 3)))
    (global.set $readLen (call $readSaveGame (i32.const 3) (i32.const 3072)))
    (global.set $writeAck (call $writeSaveGame (i32.const -1) (i32.const 2048) (i32.const 7)))
"#;

/// Tick that routes a newline-terminated line through `fd_write`, the way
/// the engine's printf machinery does.
pub const TICK_PRINTF: &str = r#"
    (i32.store (i32.const 128) (i32.const 600))
    (i32.store (i32.const 132) (i32.const 14))
    (drop (call $fdWrite (i32.const 1) (i32.const 128) (i32.const 1) (i32.const 136)))
"#;

/// Tick that leaves a partial line in the shim, then requests exit.
pub const TICK_PARTIAL_THEN_EXIT: &str = r#"
    (i32.store (i32.const 128) (i32.const 640))
    (i32.store (i32.const 132) (i32.const 13))
    (drop (call $fdWrite (i32.const 1) (i32.const 128) (i32.const 1) (i32.const 136)))
    (call $procExit (i32.const 0))
"#;

/// Builder for boundary-conforming (and deliberately broken) guest modules.
pub struct Fixture {
    init_body: &'static str,
    tick_body: &'static str,
    omit_export: Option<&'static str>,
    export_as_global: Option<&'static str>,
}

impl Fixture {
    /// A module that follows every boundary protocol.
    pub fn conforming() -> Self {
        Self::with_tick(TICK_DRAW)
    }

    /// Conforming startup with a scenario-specific tick body.
    pub fn with_tick(tick_body: &'static str) -> Self {
        Self {
            init_body: INIT_ANNOUNCE,
            tick_body,
            omit_export: None,
            export_as_global: None,
        }
    }

    /// A module whose `initGame` never announces a frame format.
    pub fn silent_init(tick_body: &'static str) -> Self {
        Self {
            init_body: "    (nop)",
            tick_body,
            omit_export: None,
            export_as_global: None,
        }
    }

    /// A module whose `initGame` traps immediately.
    pub fn broken_init() -> Self {
        Self {
            init_body: "    (unreachable)",
            tick_body: TICK_DRAW,
            omit_export: None,
            export_as_global: None,
        }
    }

    /// Drops the named export from the module.
    pub fn without(name: &'static str) -> Self {
        let mut fixture = Self::conforming();
        fixture.omit_export = Some(name);
        fixture
    }

    /// Replaces the named function export with an i32 global.
    pub fn export_as_global(name: &'static str) -> Self {
        let mut fixture = Self::conforming();
        fixture.export_as_global = Some(name);
        fixture
    }

    pub fn wat(&self) -> String {
        let mut key_globals = String::new();
        for (name, value) in KEY_VALUES {
            if self.omit_export == Some(name) {
                continue;
            }
            key_globals
                .push_str(&format!("  (global (export \"{name}\") i32 (i32.const {value}))\n"));
        }

        let mut exports = String::new();
        for (name, target) in [
            ("memory", "(memory $mem)"),
            ("initGame", "(func $initGame)"),
            ("tickGame", "(func $tickGame)"),
            ("reportKeyDown", "(func $reportKeyDown)"),
            ("reportKeyUp", "(func $reportKeyUp)"),
        ] {
            if self.omit_export == Some(name) {
                continue;
            }
            if self.export_as_global == Some(name) {
                exports
                    .push_str(&format!("  (global (export \"{name}\") i32 (i32.const 1))\n"));
                continue;
            }
            exports.push_str(&format!("  (export \"{name}\" {target})\n"));
        }

        format!(
            r#"(module
  (import "loading" "onGameInit" (func $onGameInit (param i32 i32)))
  (import "loading" "wadSizes" (func $wadSizes (param i32 i32)))
  (import "loading" "readWads" (func $readWads (param i32 i32)))
  (import "ui" "drawFrame" (func $drawFrame (param i32)))
  (import "console" "onInfoMessage" (func $onInfoMessage (param i32 i32)))
  (import "console" "onErrorMessage" (func $onErrorMessage (param i32 i32)))
  (import "runtimeControl" "timeInMilliseconds" (func $timeInMilliseconds (result i64)))
  (import "gameSaving" "sizeOfSaveGame" (func $sizeOfSaveGame (param i32) (result i32)))
  (import "gameSaving" "readSaveGame" (func $readSaveGame (param i32 i32) (result i32)))
  (import "gameSaving" "writeSaveGame" (func $writeSaveGame (param i32 i32 i32) (result i32)))
  (import "wasi_snapshot_preview1" "proc_exit" (func $procExit (param i32)))
  (import "wasi_snapshot_preview1" "fd_write" (func $fdWrite (param i32 i32 i32 i32) (result i32)))

  (memory $mem 2)

{key_globals}
  (global $lastKeyDown (export "lastKeyDown") (mut i32) (i32.const -1))
  (global $lastKeyUp (export "lastKeyUp") (mut i32) (i32.const -1))
  (global $wadCount (export "wadCount") (mut i32) (i32.const -1))
  (global $wadTotal (export "wadTotal") (mut i32) (i32.const -1))
  (global $archiveLen0 (export "archiveLen0") (mut i32) (i32.const -1))
  (global $archiveLen1 (export "archiveLen1") (mut i32) (i32.const -1))
  (global $wadHead (export "wadHead") (mut i32) (i32.const -1))
  (global $clockLow (export "clockLow") (mut i32) (i32.const -1))
  (global $writeAck (export "writeAck") (mut i32) (i32.const -1))
  (global $saveSize (export "saveSize") (mut i32) (i32.const -1))
  (global $readLen (export "readLen") (mut i32) (i32.const -1))
  (global $saveHead (export "saveHead") (mut i32) (i32.const -1))

  (data (i32.const 512) "engine online")
  (data (i32.const 560) "engine failure")
  (data (i32.const 600) "printf online\n")
  (data (i32.const 640) "partial words")
  (data (i32.const 1024) "\2a\00\00\ff")
  (data (i32.const 2048) "SAVEDAT")

  (func $initGame
{init_body}
  )
  (func $tickGame
{tick_body}
  )
  (func $reportKeyDown (param $code i32)
    (global.set $lastKeyDown (local.get $code)))
  (func $reportKeyUp (param $code i32)
    (global.set $lastKeyUp (local.get $code)))

{exports})
"#,
            key_globals = key_globals,
            init_body = self.init_body,
            tick_body = self.tick_body,
            exports = exports,
        )
    }

    pub fn bytes(&self) -> Vec<u8> {
        wat::parse_str(self.wat()).expect("fixture wat must assemble")
    }
}

/// Console lines captured by [`SharedConsole`].
#[derive(Debug, Default)]
pub struct ConsoleLog {
    pub info: Vec<String>,
    pub error: Vec<String>,
}

/// Console sink the test keeps a handle to after boxing it away.
#[derive(Debug, Default, Clone)]
pub struct SharedConsole(pub Arc<Mutex<ConsoleLog>>);

impl SharedConsole {
    pub fn new() -> (Self, Arc<Mutex<ConsoleLog>>) {
        let console = Self::default();
        let log = Arc::clone(&console.0);
        (console, log)
    }
}

impl ConsoleSink for SharedConsole {
    fn info(&mut self, line: &str) {
        self.0.lock().unwrap().info.push(line.to_owned());
    }

    fn error(&mut self, line: &str) {
        self.0.lock().unwrap().error.push(line.to_owned());
    }
}

/// Everything a [`SharedFrontend`] observed.
#[derive(Debug, Default)]
pub struct FrontendLog {
    pub init: Option<(i32, i32)>,
    pub frames: Vec<Vec<u8>>,
    pub sizes: Vec<(i32, i32)>,
}

/// Frontend that records host calls and replays a scripted input sequence,
/// one batch per poll.
pub struct SharedFrontend {
    log: Arc<Mutex<FrontendLog>>,
    script: VecDeque<Vec<InputEvent>>,
}

impl SharedFrontend {
    pub fn new() -> (Self, Arc<Mutex<FrontendLog>>) {
        Self::scripted(Vec::new())
    }

    pub fn scripted(script: Vec<Vec<InputEvent>>) -> (Self, Arc<Mutex<FrontendLog>>) {
        let log = Arc::new(Mutex::new(FrontendLog::default()));
        let frontend = Self {
            log: Arc::clone(&log),
            script: script.into(),
        };
        (frontend, log)
    }
}

impl Frontend for SharedFrontend {
    fn on_game_init(&mut self, width: i32, height: i32) {
        self.log.lock().unwrap().init = Some((width, height));
    }

    fn draw_frame(&mut self, width: i32, height: i32, pixels: &[u8]) {
        let mut log = self.log.lock().unwrap();
        log.sizes.push((width, height));
        log.frames.push(pixels.to_vec());
    }

    fn poll_input(&mut self) -> Vec<InputEvent> {
        self.script.pop_front().unwrap_or_default()
    }
}

/// Clock pinned to one reading.
pub struct FakeClock(pub i64);

impl Clock for FakeClock {
    fn elapsed_ms(&mut self) -> i64 {
        self.0
    }
}
