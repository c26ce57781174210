//! Host-embedding error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use wasmtime::Trap;

/// Errors from constructing and driving a module instance.
///
/// Construction-step variants carry the failing step's context; guest call
/// failures are folded into a single aggregated message (see
/// [`HostError::fold_call`]) because the interpreter error they wrap is
/// already a chain of its own.
#[derive(Debug, Error)]
pub enum HostError {
    /// Interpreter engine could not be configured.
    #[error("engine setup failed: {reason}")]
    Engine {
        reason: String,
        #[source]
        source: wasmtime::Error,
    },
    /// The module file could not be read.
    #[error("cannot read module at '{path}': {source}")]
    ModuleRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The module bytes did not compile.
    #[error("failed to compile module: {reason}")]
    Compile {
        reason: String,
        #[source]
        source: wasmtime::Error,
    },
    /// An archive configured for the WAD stash could not be read.
    #[error("cannot read archive at '{path}': {source}")]
    ArchiveRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// An import failed to register with the linker.
    #[error("failed to register import `{module}.{name}`: {reason}")]
    ImportRegistration {
        module: &'static str,
        name: &'static str,
        reason: String,
        #[source]
        source: wasmtime::Error,
    },
    /// Instantiation failed (unresolved imports, start trap, limits).
    #[error("failed to instantiate module: {reason}")]
    Instantiate {
        reason: String,
        #[source]
        source: wasmtime::Error,
    },
    /// A required export was not found on the instance.
    #[error("required export `{name}` is missing from the module")]
    MissingExport { name: &'static str },
    /// A required export exists but has the wrong kind.
    #[error("export `{name}` is a {actual}, expected a {expected}")]
    ExportKindMismatch {
        name: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    /// A guest offset/length pair fell outside linear memory.
    #[error("{what} at [{offset:#x}, {offset:#x}+{length}) exceeds guest memory of {size} bytes")]
    MemoryRange {
        what: &'static str,
        offset: usize,
        length: usize,
        size: usize,
    },
    /// An import was invoked in breach of its declared signature.
    #[error("call shape mismatch for import `{module}.{name}`: {detail}")]
    CallContract {
        module: &'static str,
        name: &'static str,
        detail: String,
    },
    /// A guest call failed; the message folds the interpreter error chain
    /// and any trap into one aggregated text.
    #[error("{message}")]
    Call { message: String },
}

impl HostError {
    /// Folds an optional interpreter error and an optional trap into one
    /// message under a top-level context line.
    pub fn fold_call(
        context: impl Into<String>,
        error: Option<String>,
        trap: Option<String>,
    ) -> Self {
        let mut message = context.into();
        if let Some(error) = error {
            message.push_str("; underlying error: ");
            message.push_str(&error);
        }
        if let Some(trap) = trap {
            message.push_str("; underlying trap: ");
            message.push_str(&trap);
        }
        HostError::Call { message }
    }

    /// Folds a live interpreter failure, extracting its trap code when the
    /// failure is (or wraps) a trap.
    pub fn guest_call(context: impl Into<String>, failure: &wasmtime::Error) -> Self {
        let trap = failure.downcast_ref::<Trap>().map(Trap::to_string);
        Self::fold_call(context, Some(format!("{failure:#}")), trap)
    }
}

/// Transforms technical errors into user-actionable diagnostics.
///
/// Implementors provide an optional `hint` (cause explanation) and `fix`
/// (concrete remediation step) per error variant.
pub trait Diagnostic {
    /// A human-readable explanation of the likely cause.
    fn hint(&self) -> Option<String> {
        None
    }
    /// A concrete fix the user can apply.
    fn fix(&self) -> Option<String> {
        None
    }
}

impl Diagnostic for HostError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::ModuleRead { path, .. } => Some(format!(
                "'{}' does not point at a readable file.",
                path.display()
            )),
            Self::Compile { .. } => {
                Some("The file is not a valid WebAssembly module.".into())
            }
            Self::ArchiveRead { path, .. } => Some(format!(
                "The archive '{}' could not be opened.",
                path.display()
            )),
            Self::MissingExport { name } => Some(format!(
                "The module does not expose `{name}`, so it is not the packaged engine module."
            )),
            Self::ExportKindMismatch { name, .. } => Some(format!(
                "The module exports `{name}` with an unexpected kind; it was probably built \
                 against a different interface revision."
            )),
            _ => None,
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::ModuleRead { .. } => {
                Some("Check the module path, or pass an absolute path.".into())
            }
            Self::Compile { .. } => {
                Some("Rebuild the engine module or re-download the packaged build.".into())
            }
            Self::ArchiveRead { .. } => {
                Some("Check each --wad path; the first one must be the IWAD.".into())
            }
            Self::MissingExport { .. } | Self::ExportKindMismatch { .. } => {
                Some("Point the host at a module built from the engine's WebAssembly port.".into())
            }
            _ => None,
        }
    }
}
