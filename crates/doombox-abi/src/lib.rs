//! Module/host interface contract for the doombox boundary layer.
//!
//! The game engine ships as an unmodified WebAssembly module; everything it
//! needs from the outside world crosses the linear-memory boundary through
//! the imports, exports, and binary conventions catalogued here. This crate
//! is deliberately interpreter-agnostic: it knows names, signatures, and
//! byte layouts, never runtime handles.
//!
//! - [`interface`]: import/export tables and frame geometry.
//! - [`keys`]: the semantic key-code labels the module exports as globals.
//! - [`codec`]: little-endian scalar marshalling over raw byte buffers.
//! - [`console`]: the host-provided line-oriented console sink.

pub mod codec;
pub mod console;
pub mod interface;
pub mod keys;

pub use console::ConsoleSink;
pub use interface::{
    AbiType, ExportKind, Import, RequiredExport, Signature, FRAME_BYTES_PER_PIXEL, FRAME_HEIGHT,
    FRAME_WIDTH, IMPORTS, REQUIRED_EXPORTS, SAVE_SLOTS,
};
pub use keys::{KeyLabel, MAX_KEY_CODE};
