//! Native implementations of the module's ten imports.
//!
//! Each function takes the per-call [`ModuleContext`](crate::ModuleContext)
//! and the call's integer arguments; the registry in
//! [`wrapped`](crate::wrapped) binds them to their import names. Offsets are
//! guest pointers and go through the bounds-checked memory view, never raw
//! slices.

pub(crate) mod console;
pub(crate) mod loading;
pub(crate) mod runtime;
pub(crate) mod saving;
pub(crate) mod ui;
