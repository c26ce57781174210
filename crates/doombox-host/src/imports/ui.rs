//! `ui.drawFrame`: one finished frame per tick.

use crate::context::ModuleContext;
use crate::error::HostError;

/// `ui.drawFrame(bufferOffset)`: hands the frame at `bufferOffset` to the
/// frontend. The byte count comes from the format announced through
/// `onGameInit`; a draw before that announcement is a logged error and a
/// skipped frame, not a fault.
pub(crate) fn draw_frame(
    context: &mut ModuleContext<'_, '_>,
    buffer_offset: i32,
) -> Result<(), HostError> {
    let (guest, state) = context.guest_parts()?;
    let Some(frame) = state.frame else {
        tracing::error!("drawFrame before onGameInit announced a frame format; skipping frame");
        return Ok(());
    };
    let pixels = guest.bytes("frame buffer", buffer_offset as u32, frame.byte_length())?;
    state.frontend.draw_frame(frame.width, frame.height, pixels);
    Ok(())
}
