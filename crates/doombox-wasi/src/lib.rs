//! Minimal `wasi_snapshot_preview1` shim for the engine module.
//!
//! The engine's C library is compiled against a WASI sysroot, so its `printf`
//! machinery bottoms out in five preview1 calls: `proc_exit`, `fd_fdstat_get`,
//! `fd_seek`, `fd_write`, and `fd_close`. Nothing else from WASI is ever
//! reached. Rather than pulling in a full WASI implementation, this crate
//! answers exactly those five, presenting stdout and stderr as append-only
//! character devices whose bytes are line-buffered and delivered to a
//! [`ConsoleSink`](doombox_abi::ConsoleSink).
//!
//! [`add_to_linker`] registers the calls against any store whose data
//! implements [`ShimView`]. Everything else (seek, close on other
//! descriptors, the full descriptor table) is refused with the appropriate
//! errno rather than emulated.

mod errno;
mod line;
mod linker;
mod shim;

pub use errno::Errno;
pub use line::{LineBuffer, LINE_CAPACITY};
pub use linker::{add_to_linker, ShimError, PREVIEW1_MODULE};
pub use shim::{Channel, ExitPolicy, ProcExit, ShimView, WasiShim, STDERR_FD, STDOUT_FD};
