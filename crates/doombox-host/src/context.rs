//! Per-call-site view of the live instance.

use doombox_abi::interface::{
    INIT_GAME, MEMORY, REPORT_KEY_DOWN, REPORT_KEY_UP, TICK_GAME,
};
use doombox_abi::KeyLabel;
use wasmtime::{Caller, Extern, Func, Instance, Memory, Store, Val};

use crate::error::HostError;
use crate::memory::GuestMemory;
use crate::state::HostState;

/// Where exports are resolved from.
///
/// Inside an import callback the instance handle is not available; the
/// calling interpreter frame is the only thing that can see the module's
/// exports. Driver-side code resolves through the instance directly.
enum ExportSource<'a, 'c> {
    Caller(&'a mut Caller<'c, HostState>),
    Instance {
        instance: Instance,
        store: &'a mut Store<HostState>,
    },
}

/// Lightweight handle every import implementation and every export
/// invocation goes through: store data, guest memory, exported functions
/// and globals, resolved against the appropriate source.
pub struct ModuleContext<'a, 'c> {
    source: ExportSource<'a, 'c>,
}

impl<'a, 'c> ModuleContext<'a, 'c> {
    /// Context for code running inside an import callback.
    pub fn from_caller(caller: &'a mut Caller<'c, HostState>) -> Self {
        Self {
            source: ExportSource::Caller(caller),
        }
    }

    /// Context for driver-side code holding the instance.
    pub fn from_instance(instance: Instance, store: &'a mut Store<HostState>) -> Self {
        Self {
            source: ExportSource::Instance { instance, store },
        }
    }

    /// The store data.
    pub fn state_mut(&mut self) -> &mut HostState {
        match &mut self.source {
            ExportSource::Caller(caller) => caller.data_mut(),
            ExportSource::Instance { store, .. } => store.data_mut(),
        }
    }

    fn lookup(&mut self, name: &str) -> Option<Extern> {
        match &mut self.source {
            ExportSource::Caller(caller) => caller.get_export(name),
            ExportSource::Instance { instance, store } => instance.get_export(&mut **store, name),
        }
    }

    /// The exported linear memory.
    pub fn memory(&mut self) -> Result<Memory, HostError> {
        match self.lookup(MEMORY) {
            Some(Extern::Memory(memory)) => Ok(memory),
            Some(other) => Err(HostError::ExportKindMismatch {
                name: MEMORY,
                expected: "memory",
                actual: describe_extern(&other),
            }),
            None => Err(HostError::MissingExport { name: MEMORY }),
        }
    }

    /// A fresh bounds-checked memory view plus the store data, borrowed
    /// side by side so imports can marshal bytes and mutate host state in
    /// one scope.
    pub fn guest_parts(&mut self) -> Result<(GuestMemory<'_>, &mut HostState), HostError> {
        let memory = self.memory()?;
        let (data, state) = match &mut self.source {
            ExportSource::Caller(caller) => memory.data_and_store_mut(&mut **caller),
            ExportSource::Instance { store, .. } => memory.data_and_store_mut(&mut **store),
        };
        Ok((GuestMemory::new(data), state))
    }

    /// Reads the exported i32 global `name`.
    pub fn global_i32(&mut self, name: &'static str) -> Result<i32, HostError> {
        let global = match self.lookup(name) {
            Some(Extern::Global(global)) => global,
            Some(other) => {
                return Err(HostError::ExportKindMismatch {
                    name,
                    expected: "global",
                    actual: describe_extern(&other),
                })
            }
            None => return Err(HostError::MissingExport { name }),
        };
        let value = match &mut self.source {
            ExportSource::Caller(caller) => global.get(&mut **caller),
            ExportSource::Instance { store, .. } => global.get(&mut **store),
        };
        match value {
            Val::I32(code) => Ok(code),
            _ => Err(HostError::ExportKindMismatch {
                name,
                expected: "i32 global",
                actual: "global of another type",
            }),
        }
    }

    /// Resolves a semantic key label to the numeric code the module uses,
    /// by reading its exported `KEY_*` global.
    pub fn key_code(&mut self, label: KeyLabel) -> Result<i32, HostError> {
        self.global_i32(label.global_name())
    }

    fn exported_func(&mut self, name: &'static str) -> Result<Func, HostError> {
        match self.lookup(name) {
            Some(Extern::Func(func)) => Ok(func),
            Some(other) => Err(HostError::ExportKindMismatch {
                name,
                expected: "function",
                actual: describe_extern(&other),
            }),
            None => Err(HostError::MissingExport { name }),
        }
    }

    fn call_nullary(&mut self, name: &'static str) -> Result<(), HostError> {
        let func = self.exported_func(name)?;
        let result = match &mut self.source {
            ExportSource::Caller(caller) => func
                .typed::<(), ()>(&mut **caller)
                .and_then(|typed| typed.call(&mut **caller, ())),
            ExportSource::Instance { store, .. } => func
                .typed::<(), ()>(&mut **store)
                .and_then(|typed| typed.call(&mut **store, ())),
        };
        result.map_err(|failure| HostError::guest_call(format!("calling `{name}` failed"), &failure))
    }

    fn call_key_report(&mut self, name: &'static str, code: i32) -> Result<(), HostError> {
        let func = self.exported_func(name)?;
        let result = match &mut self.source {
            ExportSource::Caller(caller) => func
                .typed::<i32, ()>(&mut **caller)
                .and_then(|typed| typed.call(&mut **caller, code)),
            ExportSource::Instance { store, .. } => func
                .typed::<i32, ()>(&mut **store)
                .and_then(|typed| typed.call(&mut **store, code)),
        };
        result.map_err(|failure| {
            HostError::guest_call(format!("calling `{name}` with key {code} failed"), &failure)
        })
    }

    /// One-time engine startup. The engine negotiates WADs and announces
    /// its frame format from inside this call.
    pub fn init_game(&mut self) -> Result<(), HostError> {
        self.call_nullary(INIT_GAME)
    }

    /// Advances the engine by one frame.
    pub fn tick_game(&mut self) -> Result<(), HostError> {
        self.call_nullary(TICK_GAME)
    }

    /// Reports a key transition to pressed.
    pub fn report_key_down(&mut self, code: i32) -> Result<(), HostError> {
        self.call_key_report(REPORT_KEY_DOWN, code)
    }

    /// Reports a key transition to released.
    pub fn report_key_up(&mut self, code: i32) -> Result<(), HostError> {
        self.call_key_report(REPORT_KEY_UP, code)
    }
}

pub(crate) fn describe_extern(value: &Extern) -> &'static str {
    match value {
        Extern::Func(_) => "function",
        Extern::Global(_) => "global",
        Extern::Memory(_) => "memory",
        Extern::Table(_) => "table",
        _ => "other export kind",
    }
}
