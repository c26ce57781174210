//! Loading, linking, instantiating, and verifying the engine module.

use std::fmt;
use std::fs;
use std::path::Path;

use doombox_abi::interface::REQUIRED_EXPORTS;
use doombox_abi::ExportKind;
use doombox_wasi::ShimView;
use wasmtime::{Config, Engine, Extern, Instance, Linker, Module, Store};

use crate::config::ModuleConfig;
use crate::context::{describe_extern, ModuleContext};
use crate::error::HostError;
use crate::state::{Collaborators, HostState};
use crate::wrapped;

/// A compiled, linked, and export-verified engine module with its store.
///
/// Construction runs the whole startup sequence except `initGame`: read or
/// accept bytes, compile, register the WASI shim and the import surface,
/// build the store data, instantiate, and check every required export. A
/// value of this type is therefore always safe to drive.
pub struct ModuleInstance {
    store: Store<HostState>,
    instance: Instance,
}

impl fmt::Debug for ModuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Store` has no `Debug` impl, so only the instance handle is shown.
        f.debug_struct("ModuleInstance")
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}

impl ModuleInstance {
    /// Builds an instance from a module file on disk.
    pub fn from_file(
        path: impl AsRef<Path>,
        config: ModuleConfig,
        collaborators: Collaborators,
    ) -> Result<Self, HostError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| HostError::ModuleRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "read module file");
        Self::from_bytes(&bytes, config, collaborators)
    }

    /// Builds an instance from module bytes already in memory.
    pub fn from_bytes(
        bytes: &[u8],
        config: ModuleConfig,
        collaborators: Collaborators,
    ) -> Result<Self, HostError> {
        let engine = Engine::new(&Config::new()).map_err(|source| HostError::Engine {
            reason: source.to_string(),
            source,
        })?;
        let module = Module::new(&engine, bytes).map_err(|source| HostError::Compile {
            reason: format!("{source:#}"),
            source,
        })?;

        let mut linker: Linker<HostState> = Linker::new(&engine);
        doombox_wasi::add_to_linker(&mut linker).map_err(|source| {
            HostError::ImportRegistration {
                module: doombox_wasi::PREVIEW1_MODULE,
                name: "*",
                reason: source.to_string(),
                source,
            }
        })?;
        wrapped::register_imports(&mut linker)?;

        let state = HostState::new(&config, collaborators)?;
        let mut store = Store::new(&engine, state);
        let instance =
            linker
                .instantiate(&mut store, &module)
                .map_err(|source| HostError::Instantiate {
                    reason: format!("{source:#}"),
                    source,
                })?;

        let mut built = Self { store, instance };
        built.verify_exports()?;
        Ok(built)
    }

    /// Checks that every required export exists with the right kind: the
    /// four entry points, the linear memory, and the key-code globals.
    fn verify_exports(&mut self) -> Result<(), HostError> {
        for required in REQUIRED_EXPORTS {
            let Some(found) = self.instance.get_export(&mut self.store, required.name) else {
                return Err(HostError::MissingExport {
                    name: required.name,
                });
            };
            let conforms = match required.kind {
                ExportKind::Func => matches!(found, Extern::Func(_)),
                ExportKind::Memory => matches!(found, Extern::Memory(_)),
                ExportKind::Global => matches!(found, Extern::Global(_)),
            };
            if !conforms {
                return Err(HostError::ExportKindMismatch {
                    name: required.name,
                    expected: required.kind.describe(),
                    actual: describe_extern(&found),
                });
            }
        }
        tracing::debug!(
            exports = REQUIRED_EXPORTS.len(),
            "verified the module's export surface"
        );
        Ok(())
    }

    /// A context resolving exports through the instance, for driver-side
    /// calls into the module.
    pub fn context(&mut self) -> ModuleContext<'_, '_> {
        ModuleContext::from_instance(self.instance, &mut self.store)
    }

    /// The store data.
    pub fn state(&self) -> &HostState {
        self.store.data()
    }

    pub(crate) fn state_mut(&mut self) -> &mut HostState {
        self.store.data_mut()
    }

    /// Flushes partial console lines still sitting in the WASI shim, so a
    /// final message without a trailing newline is not lost at shutdown.
    pub fn drain_console(&mut self) {
        let (shim, console) = self.store.data_mut().shim_parts();
        shim.drain(console);
    }
}
