//! Static configuration for a module instance.

use std::path::PathBuf;

use doombox_wasi::ExitPolicy;

use crate::save_store::{DirSaveStore, MemSaveStore, SaveStore};

/// Where save-game records live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveBackend {
    /// In-memory; saves vanish with the instance.
    #[default]
    Memory,
    /// `doomsav<slot>.dsg` files under this directory.
    Directory(PathBuf),
}

impl SaveBackend {
    pub(crate) fn build(&self) -> Box<dyn SaveStore> {
        match self {
            SaveBackend::Memory => Box::new(MemSaveStore::new()),
            SaveBackend::Directory(dir) => Box::new(DirSaveStore::new(dir)),
        }
    }
}

/// Everything an instance needs besides the module bytes and collaborators.
#[derive(Debug, Clone, Default)]
pub struct ModuleConfig {
    /// Archive files to offer the engine, IWAD first. Empty means the
    /// engine falls back to its built-in data.
    pub wads: Vec<PathBuf>,
    /// Save-game persistence choice.
    pub saves: SaveBackend,
    /// What a guest `proc_exit` does.
    pub exit_policy: ExitPolicy,
}
