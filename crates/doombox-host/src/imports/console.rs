//! `console.*`: line-oriented engine text.
//!
//! The engine delivers whole lines here (its own printf machinery goes
//! through the WASI shim instead); the host just decodes the guest range
//! and forwards it.

use crate::context::ModuleContext;
use crate::error::HostError;

/// `console.onInfoMessage(textOffset, length)`
pub(crate) fn on_info_message(
    context: &mut ModuleContext<'_, '_>,
    text_offset: i32,
    length: i32,
) -> Result<(), HostError> {
    let (guest, state) = context.guest_parts()?;
    let line = guest.text("info message", text_offset as u32, length as u32)?;
    state.console.info(&line);
    Ok(())
}

/// `console.onErrorMessage(textOffset, length)`
pub(crate) fn on_error_message(
    context: &mut ModuleContext<'_, '_>,
    text_offset: i32,
    length: i32,
) -> Result<(), HostError> {
    let (guest, state) = context.guest_parts()?;
    let line = guest.text("error message", text_offset as u32, length as u32)?;
    state.console.error(&line);
    Ok(())
}
