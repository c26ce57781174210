//! Generic function wrapper and the import registry.
//!
//! The module's import surface uses exactly six native shapes: zero to three
//! i32 parameters crossed with no result, one i32 result, or one i64 result.
//! Rather than hand-writing interpreter marshalling per import, each native
//! function is carried by a [`NativeFn`] variant for its shape; a single
//! dispatcher validates the untyped call against the declared signature
//! (argument count, argument types, result slot count) before the native
//! call runs, and repacks the typed result afterwards. [`REGISTRY`] binds
//! every import name to its wrapped function, and registration walks it.

use doombox_abi::interface::{AbiType, Signature};
use wasmtime::{Engine, FuncType, Linker, Val, ValType};

use crate::context::ModuleContext;
use crate::error::HostError;
use crate::imports;
use crate::state::HostState;

/// A native import implementation, tagged by its signature shape.
#[derive(Clone, Copy)]
pub enum NativeFn {
    /// `(i32, i32) -> ()`
    A2(fn(&mut ModuleContext<'_, '_>, i32, i32) -> Result<(), HostError>),
    /// `(i32) -> ()`
    A1(fn(&mut ModuleContext<'_, '_>, i32) -> Result<(), HostError>),
    /// `() -> i64`
    R64(fn(&mut ModuleContext<'_, '_>) -> Result<i64, HostError>),
    /// `(i32) -> i32`
    A1R32(fn(&mut ModuleContext<'_, '_>, i32) -> Result<i32, HostError>),
    /// `(i32, i32) -> i32`
    A2R32(fn(&mut ModuleContext<'_, '_>, i32, i32) -> Result<i32, HostError>),
    /// `(i32, i32, i32) -> i32`
    A3R32(fn(&mut ModuleContext<'_, '_>, i32, i32, i32) -> Result<i32, HostError>),
}

impl NativeFn {
    /// The declared boundary signature of this shape.
    pub fn signature(&self) -> Signature {
        const I32: AbiType = AbiType::I32;
        match self {
            NativeFn::A2(_) => Signature {
                params: &[I32, I32],
                result: None,
            },
            NativeFn::A1(_) => Signature {
                params: &[I32],
                result: None,
            },
            NativeFn::R64(_) => Signature {
                params: &[],
                result: Some(AbiType::I64),
            },
            NativeFn::A1R32(_) => Signature {
                params: &[I32],
                result: Some(I32),
            },
            NativeFn::A2R32(_) => Signature {
                params: &[I32, I32],
                result: Some(I32),
            },
            NativeFn::A3R32(_) => Signature {
                params: &[I32, I32, I32],
                result: Some(I32),
            },
        }
    }
}

/// One entry of the import registry: a name bound to a wrapped native
/// function.
#[derive(Clone, Copy)]
pub struct WrappedFunc {
    pub module: &'static str,
    pub name: &'static str,
    pub fun: NativeFn,
}

impl WrappedFunc {
    pub fn signature(&self) -> Signature {
        self.fun.signature()
    }

    fn func_type(&self, engine: &Engine) -> FuncType {
        let signature = self.signature();
        FuncType::new(
            engine,
            signature.params.iter().map(|kind| val_type(*kind)),
            signature.result.map(val_type),
        )
    }

    fn contract(&self, detail: String) -> HostError {
        HostError::CallContract {
            module: self.module,
            name: self.name,
            detail,
        }
    }

    /// Validates the untyped call against the declared signature and, only
    /// then, dispatches to the native function.
    pub fn dispatch(
        &self,
        context: &mut ModuleContext<'_, '_>,
        params: &[Val],
        results: &mut [Val],
    ) -> Result<(), HostError> {
        let signature = self.signature();
        let wanted_results = usize::from(signature.result.is_some());
        if results.len() != wanted_results {
            return Err(self.contract(format!(
                "{} result slots supplied, {} declared",
                results.len(),
                wanted_results
            )));
        }
        match (self.fun, params) {
            (NativeFn::A2(fun), [Val::I32(a), Val::I32(b)]) => fun(context, *a, *b),
            (NativeFn::A1(fun), [Val::I32(a)]) => fun(context, *a),
            (NativeFn::R64(fun), []) => {
                results[0] = Val::I64(fun(context)?);
                Ok(())
            }
            (NativeFn::A1R32(fun), [Val::I32(a)]) => {
                results[0] = Val::I32(fun(context, *a)?);
                Ok(())
            }
            (NativeFn::A2R32(fun), [Val::I32(a), Val::I32(b)]) => {
                results[0] = Val::I32(fun(context, *a, *b)?);
                Ok(())
            }
            (NativeFn::A3R32(fun), [Val::I32(a), Val::I32(b), Val::I32(c)]) => {
                results[0] = Val::I32(fun(context, *a, *b, *c)?);
                Ok(())
            }
            _ => Err(self.contract(format!(
                "arguments do not match the declared shape {}",
                render(&signature)
            ))),
        }
    }
}

fn val_type(kind: AbiType) -> ValType {
    match kind {
        AbiType::I32 => ValType::I32,
        AbiType::I64 => ValType::I64,
    }
}

fn render(signature: &Signature) -> String {
    let params: Vec<&str> = signature
        .params
        .iter()
        .map(|kind| match kind {
            AbiType::I32 => "i32",
            AbiType::I64 => "i64",
        })
        .collect();
    let result = match signature.result {
        Some(AbiType::I32) => "i32",
        Some(AbiType::I64) => "i64",
        None => "()",
    };
    format!("({}) -> {}", params.join(", "), result)
}

/// Every import the module requires, bound to its native implementation.
pub const REGISTRY: &[WrappedFunc] = &[
    WrappedFunc {
        module: "loading",
        name: "onGameInit",
        fun: NativeFn::A2(imports::loading::on_game_init),
    },
    WrappedFunc {
        module: "loading",
        name: "wadSizes",
        fun: NativeFn::A2(imports::loading::wad_sizes),
    },
    WrappedFunc {
        module: "loading",
        name: "readWads",
        fun: NativeFn::A2(imports::loading::read_wads),
    },
    WrappedFunc {
        module: "ui",
        name: "drawFrame",
        fun: NativeFn::A1(imports::ui::draw_frame),
    },
    WrappedFunc {
        module: "console",
        name: "onInfoMessage",
        fun: NativeFn::A2(imports::console::on_info_message),
    },
    WrappedFunc {
        module: "console",
        name: "onErrorMessage",
        fun: NativeFn::A2(imports::console::on_error_message),
    },
    WrappedFunc {
        module: "runtimeControl",
        name: "timeInMilliseconds",
        fun: NativeFn::R64(imports::runtime::time_in_milliseconds),
    },
    WrappedFunc {
        module: "gameSaving",
        name: "sizeOfSaveGame",
        fun: NativeFn::A1R32(imports::saving::size_of_save_game),
    },
    WrappedFunc {
        module: "gameSaving",
        name: "readSaveGame",
        fun: NativeFn::A2R32(imports::saving::read_save_game),
    },
    WrappedFunc {
        module: "gameSaving",
        name: "writeSaveGame",
        fun: NativeFn::A3R32(imports::saving::write_save_game),
    },
];

/// Registers the whole import surface with the linker. Each entry dispatches
/// through its wrapper, so a malformed call traps instead of reaching the
/// native function.
pub fn register_imports(linker: &mut Linker<HostState>) -> Result<(), HostError> {
    for entry in REGISTRY {
        let ty = entry.func_type(linker.engine());
        linker
            .func_new(entry.module, entry.name, ty, move |mut caller, params, results| {
                let mut context = ModuleContext::from_caller(&mut caller);
                entry
                    .dispatch(&mut context, params, results)
                    .map_err(wasmtime::Error::from)
            })
            .map_err(|source| HostError::ImportRegistration {
                module: entry.module,
                name: entry.name,
                reason: source.to_string(),
                source,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModuleConfig;
    use crate::state::Collaborators;
    use doombox_abi::interface;
    use wasmtime::{Instance, Module, Store};

    fn entry(module: &str, name: &str) -> &'static WrappedFunc {
        REGISTRY
            .iter()
            .find(|entry| entry.module == module && entry.name == name)
            .expect("registry entry")
    }

    /// An importless instance is enough to dispatch against: shape
    /// validation never touches the guest.
    fn harness() -> (Store<HostState>, Instance) {
        let engine = Engine::default();
        let binary = wat::parse_str("(module)").expect("fixture wat");
        let module = Module::new(&engine, binary).expect("fixture module");
        let state =
            HostState::new(&ModuleConfig::default(), Collaborators::default()).expect("state");
        let mut store = Store::new(&engine, state);
        let instance = Linker::new(&engine)
            .instantiate(&mut store, &module)
            .expect("instantiate");
        (store, instance)
    }

    #[test]
    fn registry_matches_the_declared_import_surface() {
        assert_eq!(REGISTRY.len(), interface::IMPORTS.len());
        for declared in interface::IMPORTS {
            let bound = entry(declared.module, declared.name);
            assert_eq!(
                bound.signature(),
                declared.signature,
                "{}.{} signature drifted",
                declared.module,
                declared.name
            );
        }
    }

    #[test]
    fn render_spells_out_shapes() {
        let clock = entry("runtimeControl", "timeInMilliseconds");
        assert_eq!(render(&clock.signature()), "() -> i64");
        let write = entry("gameSaving", "writeSaveGame");
        assert_eq!(render(&write.signature()), "(i32, i32, i32) -> i32");
    }

    #[test]
    fn missing_result_slot_is_rejected() {
        let (mut store, instance) = harness();
        let mut context = ModuleContext::from_instance(instance, &mut store);
        let clock = entry("runtimeControl", "timeInMilliseconds");
        let err = clock
            .dispatch(&mut context, &[], &mut [])
            .expect_err("must reject");
        match err {
            HostError::CallContract { name, detail, .. } => {
                assert_eq!(name, "timeInMilliseconds");
                assert!(detail.contains("result slots"), "detail: {detail}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn arity_mismatch_is_rejected_before_the_native_call() {
        let (mut store, instance) = harness();
        let init = entry("loading", "onGameInit");
        {
            let mut context = ModuleContext::from_instance(instance, &mut store);
            let err = init
                .dispatch(&mut context, &[Val::I32(640)], &mut [])
                .expect_err("must reject");
            match err {
                HostError::CallContract { detail, .. } => {
                    assert!(detail.contains("(i32, i32) -> ()"), "detail: {detail}");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
        assert!(store.data().frame().is_none(), "native fn must not run");
    }

    #[test]
    fn a_stray_argument_to_a_nullary_import_is_rejected() {
        let (mut store, instance) = harness();
        let mut context = ModuleContext::from_instance(instance, &mut store);
        let clock = entry("runtimeControl", "timeInMilliseconds");
        let mut results = [Val::I64(0)];
        let err = clock
            .dispatch(&mut context, &[Val::I32(5)], &mut results)
            .expect_err("must reject");
        assert!(matches!(err, HostError::CallContract { .. }));
    }

    #[test]
    fn argument_type_mismatch_is_rejected() {
        let (mut store, instance) = harness();
        let mut context = ModuleContext::from_instance(instance, &mut store);
        let init = entry("loading", "onGameInit");
        let err = init
            .dispatch(&mut context, &[Val::I64(640), Val::I32(400)], &mut [])
            .expect_err("must reject");
        assert!(matches!(err, HostError::CallContract { .. }));
    }

    #[test]
    fn well_formed_call_reaches_the_native_function() {
        let (mut store, instance) = harness();
        {
            let mut context = ModuleContext::from_instance(instance, &mut store);
            let init = entry("loading", "onGameInit");
            init.dispatch(&mut context, &[Val::I32(640), Val::I32(400)], &mut [])
                .expect("dispatch");
        }
        let frame = store.data().frame().expect("frame announced");
        assert_eq!((frame.width, frame.height), (640, 400));

        let mut context = ModuleContext::from_instance(instance, &mut store);
        let clock = entry("runtimeControl", "timeInMilliseconds");
        let mut results = [Val::I64(-1)];
        clock
            .dispatch(&mut context, &[], &mut results)
            .expect("dispatch");
        match results[0] {
            Val::I64(elapsed) => assert!(elapsed >= 0),
            ref other => panic!("unexpected result: {other:?}"),
        }
    }
}
