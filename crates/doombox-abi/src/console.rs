//! Host-provided console callbacks.

/// Receives one full line of guest console text at a time.
///
/// Lines arrive without their terminating newline. A line is delivered when
/// the guest writes a newline to the corresponding descriptor or when the
/// shim's line buffer fills and is force-flushed.
pub trait ConsoleSink {
    /// One line of standard-output text.
    fn info(&mut self, line: &str);

    /// One line of standard-error text.
    fn error(&mut self, line: &str);
}
