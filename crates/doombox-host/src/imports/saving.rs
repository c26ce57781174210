//! `gameSaving.*`: the per-slot save protocol.
//!
//! Read is two-phase (size, then copy); write is single-shot with the
//! persisted byte count echoed back. Store problems degrade to "absent" or
//! "zero persisted" so a broken save directory never faults the instance.

use crate::context::ModuleContext;
use crate::error::HostError;

fn valid_slot(slot: i32) -> Option<u32> {
    match u32::try_from(slot) {
        Ok(slot) => Some(slot),
        Err(_) => {
            tracing::warn!(slot, "negative save slot refused");
            None
        }
    }
}

/// `gameSaving.sizeOfSaveGame(slot) -> i32`: byte size of the record in
/// `slot`, 0 when no save exists.
pub(crate) fn size_of_save_game(
    context: &mut ModuleContext<'_, '_>,
    slot: i32,
) -> Result<i32, HostError> {
    let Some(slot) = valid_slot(slot) else {
        return Ok(0);
    };
    let size = context.state_mut().saves.size(slot);
    Ok(size.min(i32::MAX as usize) as i32)
}

/// `gameSaving.readSaveGame(slot, destOffset) -> i32`: copies the record
/// into guest memory and returns how many bytes were copied. The engine
/// compares this against the size it negotiated.
pub(crate) fn read_save_game(
    context: &mut ModuleContext<'_, '_>,
    slot: i32,
    dest_offset: i32,
) -> Result<i32, HostError> {
    let Some(slot) = valid_slot(slot) else {
        return Ok(0);
    };
    let (mut guest, state) = context.guest_parts()?;
    let Some(record) = state.saves.read(slot) else {
        tracing::warn!(slot, "readSaveGame for an absent slot");
        return Ok(0);
    };
    guest.write_bytes("save record", dest_offset as u32, &record)?;
    tracing::debug!(slot, bytes = record.len(), "save copied to guest");
    Ok(record.len().min(i32::MAX as usize) as i32)
}

/// `gameSaving.writeSaveGame(slot, dataOffset, length) -> i32`: persists the
/// guest bytes and returns how many were persisted; anything short of
/// `length` tells the engine the save failed, and 0 means saving is
/// unsupported.
pub(crate) fn write_save_game(
    context: &mut ModuleContext<'_, '_>,
    slot: i32,
    data_offset: i32,
    length: i32,
) -> Result<i32, HostError> {
    let Some(slot) = valid_slot(slot) else {
        return Ok(0);
    };
    let Ok(length) = u32::try_from(length) else {
        tracing::warn!(length, "negative save length refused");
        return Ok(0);
    };
    let (guest, state) = context.guest_parts()?;
    let bytes = guest.bytes("save payload", data_offset as u32, length as usize)?;
    let persisted = state.saves.write(slot, bytes);
    tracing::debug!(slot, bytes = persisted, "save persisted");
    Ok(persisted.min(i32::MAX as usize) as i32)
}
