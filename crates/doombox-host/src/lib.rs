//! # doombox-host
//!
//! Native host embedding for the packaged engine module. Compiles and links
//! the module with Wasmtime, supplies its import surface (WAD loading,
//! frame delivery, console, clock, save games) and the small WASI shim it
//! expects, verifies the export surface, and drives the init/tick loop.

pub mod clock;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod frontend;
mod imports;
pub mod instance;
pub mod memory;
pub mod save_store;
pub mod state;
pub mod wrapped;

pub use clock::{Clock, SystemClock};
pub use config::{ModuleConfig, SaveBackend};
pub use context::ModuleContext;
pub use doombox_abi::{ConsoleSink, KeyLabel};
pub use doombox_wasi::ExitPolicy;
pub use driver::{run, RunOutcome};
pub use error::{Diagnostic, HostError};
pub use frontend::{Frontend, HeadlessFrontend, InputEvent, LogConsole};
pub use instance::ModuleInstance;
pub use memory::GuestMemory;
pub use save_store::{DirSaveStore, MemSaveStore, SaveStore};
pub use state::{Collaborators, FrameInfo, HostState, WadStash};
