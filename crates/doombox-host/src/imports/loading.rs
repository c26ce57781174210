//! `loading.*`: startup announcement and the two-phase WAD transfer.

use crate::context::ModuleContext;
use crate::error::HostError;
use crate::state::FrameInfo;

/// `loading.onGameInit(width, height)`: the engine announces its frame
/// format before the first draw.
pub(crate) fn on_game_init(
    context: &mut ModuleContext<'_, '_>,
    width: i32,
    height: i32,
) -> Result<(), HostError> {
    tracing::info!(width, height, "engine initialized");
    let state = context.state_mut();
    state.frame = Some(FrameInfo { width, height });
    state.frontend.on_game_init(width, height);
    Ok(())
}

/// `loading.wadSizes(countOffset, totalOffset)`: phase one of the WAD
/// transfer. Writes how many archives the host offers and their combined
/// byte size; a zero count tells the engine to use its built-in data.
pub(crate) fn wad_sizes(
    context: &mut ModuleContext<'_, '_>,
    count_offset: i32,
    total_offset: i32,
) -> Result<(), HostError> {
    let (mut guest, state) = context.guest_parts()?;
    let count = state.wads.count();
    let total = state.wads.total_bytes();
    tracing::debug!(count, total, "negotiating archive sizes");
    guest.write_i32("archive count cell", count_offset as u32, count as i32)?;
    guest.write_i32("archive total cell", total_offset as u32, total as i32)?;
    Ok(())
}

/// `loading.readWads(dataOffset, lengthsOffset)`: phase two. Copies every
/// archive, concatenated in load order, to `dataOffset`, and one i32 byte
/// length per archive to `lengthsOffset`. Only called when phase one
/// reported a nonzero count.
pub(crate) fn read_wads(
    context: &mut ModuleContext<'_, '_>,
    data_offset: i32,
    lengths_offset: i32,
) -> Result<(), HostError> {
    let (mut guest, state) = context.guest_parts()?;
    let mut cursor = data_offset as u32;
    for (index, archive) in state.wads.archives().iter().enumerate() {
        guest.write_bytes("archive bytes", cursor, archive)?;
        guest.write_i32(
            "archive length entry",
            lengths_offset as u32 + index as u32 * 4,
            archive.len() as i32,
        )?;
        cursor += archive.len() as u32;
    }
    tracing::info!(
        archives = state.wads.count(),
        bytes = state.wads.total_bytes(),
        "copied archives into guest memory"
    );
    Ok(())
}
