//! Import/export tables for the packaged engine module.
//!
//! The tables mirror the module's published interface: ten imports grouped
//! under four module names, four exported entry points, the exported linear
//! memory, and one exported i32 global per semantic key label. Hosts
//! register imports and verify exports against these tables instead of
//! scattering name strings through the embedding.

/// Scalar value types that cross the module boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiType {
    I32,
    I64,
}

/// Parameter and result shape of one boundary function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub params: &'static [AbiType],
    pub result: Option<AbiType>,
}

/// One function the module requires the host to supply.
#[derive(Debug, Clone, Copy)]
pub struct Import {
    /// Import module name (`loading`, `ui`, `console`, `runtimeControl`,
    /// `gameSaving`).
    pub module: &'static str,
    /// Import field name.
    pub name: &'static str,
    pub signature: Signature,
}

/// Kind of a required module export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Func,
    Memory,
    Global,
}

impl ExportKind {
    pub fn describe(self) -> &'static str {
        match self {
            ExportKind::Func => "function",
            ExportKind::Memory => "memory",
            ExportKind::Global => "global",
        }
    }
}

/// One export the host refuses to run without.
#[derive(Debug, Clone, Copy)]
pub struct RequiredExport {
    pub name: &'static str,
    pub kind: ExportKind,
}

/// Exported entry point: one-time engine startup. Takes no arguments in the
/// packaged module; configuration is negotiated through imports beforehand.
pub const INIT_GAME: &str = "initGame";
/// Exported entry point: advance the engine by one frame.
pub const TICK_GAME: &str = "tickGame";
/// Exported entry point: report a key transition to pressed.
pub const REPORT_KEY_DOWN: &str = "reportKeyDown";
/// Exported entry point: report a key transition to released.
pub const REPORT_KEY_UP: &str = "reportKeyUp";
/// Name of the exported linear memory.
pub const MEMORY: &str = "memory";

/// Frame geometry of the packaged module. The frame buffer handed to the
/// draw import is row-major from the top-left, four bytes per pixel in
/// blue-green-red-alpha order.
pub const FRAME_WIDTH: i32 = 640;
pub const FRAME_HEIGHT: i32 = 400;
pub const FRAME_BYTES_PER_PIXEL: usize = 4;

/// Save slots the engine's menu exposes. The save protocol itself accepts
/// any non-negative slot; this bound is for hosts building slot pickers.
pub const SAVE_SLOTS: i32 = 6;

/// The complete import surface required of a host, in registration order.
pub const IMPORTS: &[Import] = &[
    Import {
        module: "loading",
        name: "onGameInit",
        signature: Signature {
            params: &[AbiType::I32, AbiType::I32],
            result: None,
        },
    },
    Import {
        module: "loading",
        name: "wadSizes",
        signature: Signature {
            params: &[AbiType::I32, AbiType::I32],
            result: None,
        },
    },
    Import {
        module: "loading",
        name: "readWads",
        signature: Signature {
            params: &[AbiType::I32, AbiType::I32],
            result: None,
        },
    },
    Import {
        module: "ui",
        name: "drawFrame",
        signature: Signature {
            params: &[AbiType::I32],
            result: None,
        },
    },
    Import {
        module: "console",
        name: "onInfoMessage",
        signature: Signature {
            params: &[AbiType::I32, AbiType::I32],
            result: None,
        },
    },
    Import {
        module: "console",
        name: "onErrorMessage",
        signature: Signature {
            params: &[AbiType::I32, AbiType::I32],
            result: None,
        },
    },
    Import {
        module: "runtimeControl",
        name: "timeInMilliseconds",
        signature: Signature {
            params: &[],
            result: Some(AbiType::I64),
        },
    },
    Import {
        module: "gameSaving",
        name: "sizeOfSaveGame",
        signature: Signature {
            params: &[AbiType::I32],
            result: Some(AbiType::I32),
        },
    },
    Import {
        module: "gameSaving",
        name: "readSaveGame",
        signature: Signature {
            params: &[AbiType::I32, AbiType::I32],
            result: Some(AbiType::I32),
        },
    },
    Import {
        module: "gameSaving",
        name: "writeSaveGame",
        signature: Signature {
            params: &[AbiType::I32, AbiType::I32, AbiType::I32],
            result: Some(AbiType::I32),
        },
    },
];

/// Looks up an import by module and field name.
pub fn import(module: &str, name: &str) -> Option<&'static Import> {
    IMPORTS
        .iter()
        .find(|entry| entry.module == module && entry.name == name)
}

/// Everything the host verifies after instantiation: the four entry points,
/// the linear memory, and one i32 global per key label.
pub const REQUIRED_EXPORTS: &[RequiredExport] = &[
    RequiredExport {
        name: INIT_GAME,
        kind: ExportKind::Func,
    },
    RequiredExport {
        name: TICK_GAME,
        kind: ExportKind::Func,
    },
    RequiredExport {
        name: REPORT_KEY_DOWN,
        kind: ExportKind::Func,
    },
    RequiredExport {
        name: REPORT_KEY_UP,
        kind: ExportKind::Func,
    },
    RequiredExport {
        name: MEMORY,
        kind: ExportKind::Memory,
    },
    RequiredExport {
        name: "KEY_ALT",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_BACKSPACE",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_DOWNARROW",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_ENTER",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_ESCAPE",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_FIRE",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_LEFTARROW",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_RIGHTARROW",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_SHIFT",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_STRAFE_L",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_STRAFE_R",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_TAB",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_UPARROW",
        kind: ExportKind::Global,
    },
    RequiredExport {
        name: "KEY_USE",
        kind: ExportKind::Global,
    },
];
