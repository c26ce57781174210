use doombox_abi::ConsoleSink;
use thiserror::Error;

use crate::line::LineBuffer;

/// Descriptor number the guest's stdout arrives on.
pub const STDOUT_FD: i32 = 1;
/// Descriptor number the guest's stderr arrives on.
pub const STDERR_FD: i32 = 2;

/// The two virtual character devices the shim exposes, selected by
/// descriptor number at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// stdout; completed lines go to [`ConsoleSink::info`].
    Info,
    /// stderr; completed lines go to [`ConsoleSink::error`].
    Error,
}

impl Channel {
    /// Maps a descriptor number to its channel, refusing everything that is
    /// not stdout or stderr.
    pub fn from_fd(fd: i32) -> Option<Channel> {
        match fd {
            STDOUT_FD => Some(Channel::Info),
            STDERR_FD => Some(Channel::Error),
            _ => None,
        }
    }
}

/// What `proc_exit` does when the guest calls it.
///
/// The engine's own `main` never returns, so an exit request normally means
/// the demo loop finished or a fatal error path ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Record the code and unwind the in-progress guest call with a
    /// [`ProcExit`] error the embedder can downcast to.
    #[default]
    Record,
    /// Log the request and return control to the guest as if the call had
    /// succeeded. `proc_exit` is declared `noreturn`, so the guest traps in
    /// its own epilogue shortly after; useful only for diagnosis.
    Ignore,
}

/// Unwinds a guest call when the module requests process exit under
/// [`ExitPolicy::Record`].
///
/// Embedders downcast the error returned from the guest call to this type to
/// tell a requested exit apart from a genuine fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("guest requested process exit with code {code}")]
pub struct ProcExit {
    pub code: i32,
}

/// Store-data view the registered calls operate through.
///
/// The shim state and the console it flushes into usually live side by side
/// in the embedder's store data; a single split-borrow accessor lets the
/// calls hold both at once.
pub trait ShimView {
    fn shim_parts(&mut self) -> (&mut WasiShim, &mut dyn ConsoleSink);
}

/// Per-instance state of the shim: one line buffer per virtual descriptor
/// plus the exit bookkeeping.
#[derive(Debug)]
pub struct WasiShim {
    stdout: LineBuffer,
    stderr: LineBuffer,
    exit_policy: ExitPolicy,
    exit_code: Option<i32>,
}

impl WasiShim {
    pub fn new(exit_policy: ExitPolicy) -> Self {
        Self {
            stdout: LineBuffer::default(),
            stderr: LineBuffer::default(),
            exit_policy,
            exit_code: None,
        }
    }

    pub fn exit_policy(&self) -> ExitPolicy {
        self.exit_policy
    }

    /// Exit code recorded by `proc_exit`, if the guest ever called it.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn record_exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }

    /// Feeds bytes written to a channel through its line buffer, delivering
    /// every completed line to the sink.
    ///
    /// A newline completes the current line (the newline itself is not
    /// delivered). A byte that would not fit force-flushes the buffer first,
    /// so over-long lines arrive in capacity-sized pieces.
    pub fn consume(&mut self, channel: Channel, bytes: &[u8], console: &mut dyn ConsoleSink) {
        let buffer = match channel {
            Channel::Info => &mut self.stdout,
            Channel::Error => &mut self.stderr,
        };
        for &byte in bytes {
            if byte == b'\n' {
                deliver(channel, buffer.take_line(), console);
            } else {
                if buffer.is_full() {
                    deliver(channel, buffer.take_line(), console);
                }
                buffer.push(byte);
            }
        }
    }

    /// Flushes any partial lines still buffered, typically at shutdown so a
    /// final message without a trailing newline is not lost.
    pub fn drain(&mut self, console: &mut dyn ConsoleSink) {
        if !self.stdout.is_empty() {
            deliver(Channel::Info, self.stdout.take_line(), console);
        }
        if !self.stderr.is_empty() {
            deliver(Channel::Error, self.stderr.take_line(), console);
        }
    }
}

impl Default for WasiShim {
    fn default() -> Self {
        Self::new(ExitPolicy::default())
    }
}

fn deliver(channel: Channel, line: String, console: &mut dyn ConsoleSink) {
    match channel {
        Channel::Info => console.info(&line),
        Channel::Error => console.error(&line),
    }
}
