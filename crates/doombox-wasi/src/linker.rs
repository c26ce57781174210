use doombox_abi::codec::{read_u32_le, write_u32_le, write_u64_le};
use doombox_abi::interface::MEMORY;
use thiserror::Error;
use wasmtime::{Caller, Extern, Linker, Memory};

use crate::errno::Errno;
use crate::shim::{Channel, ExitPolicy, ProcExit, ShimView};

/// Module name the engine imports the calls under.
pub const PREVIEW1_MODULE: &str = "wasi_snapshot_preview1";

/// Size of the `fdstat` struct `fd_fdstat_get` writes into guest memory.
const FDSTAT_SIZE: usize = 24;
/// `__WASI_FILETYPE_CHARACTER_DEVICE`
const FILETYPE_CHARACTER_DEVICE: u8 = 2;
/// `__WASI_RIGHTS_FD_WRITE`
const RIGHTS_FD_WRITE: u64 = 1 << 6;
/// Byte size of one `ciovec` entry: a 32-bit pointer and a 32-bit length.
const CIOVEC_SIZE: usize = 8;

/// Faults the shim raises as traps. The guest passed a pointer it does not
/// own, or the module is shaped wrong; either way the call cannot be
/// answered with an errno.
#[derive(Debug, Error)]
pub enum ShimError {
    #[error("the module does not export its linear memory as `{MEMORY}`")]
    MemoryMissing,
    #[error("{what} at [{offset:#x}, {offset:#x}+{length}) falls outside guest memory")]
    OutOfBounds {
        what: &'static str,
        offset: usize,
        length: usize,
    },
}

/// Registers the five preview1 calls the engine module imports.
///
/// `fd_write` and `fd_fdstat_get` read and write guest memory through the
/// module's own `memory` export; the other three never touch memory.
pub fn add_to_linker<T: ShimView + 'static>(linker: &mut Linker<T>) -> wasmtime::Result<()> {
    linker.func_wrap(PREVIEW1_MODULE, "proc_exit", proc_exit::<T>)?;
    linker.func_wrap(PREVIEW1_MODULE, "fd_fdstat_get", fd_fdstat_get::<T>)?;
    linker.func_wrap(PREVIEW1_MODULE, "fd_seek", fd_seek::<T>)?;
    linker.func_wrap(PREVIEW1_MODULE, "fd_write", fd_write::<T>)?;
    linker.func_wrap(PREVIEW1_MODULE, "fd_close", fd_close::<T>)?;
    Ok(())
}

fn proc_exit<T: ShimView>(mut caller: Caller<'_, T>, code: i32) -> wasmtime::Result<()> {
    let (shim, _) = caller.data_mut().shim_parts();
    match shim.exit_policy() {
        ExitPolicy::Record => {
            shim.record_exit(code);
            Err(ProcExit { code }.into())
        }
        ExitPolicy::Ignore => {
            tracing::warn!(code, "guest requested process exit; continuing per exit policy");
            Ok(())
        }
    }
}

fn fd_fdstat_get<T: ShimView>(
    mut caller: Caller<'_, T>,
    fd: i32,
    stat_offset: i32,
) -> wasmtime::Result<i32> {
    if Channel::from_fd(fd).is_none() {
        return Ok(Errno::BadF.raw());
    }
    let memory = exported_memory(&mut caller)?;
    let data = memory.data_mut(&mut caller);
    let stat = checked_mut(data, "fdstat struct", stat_offset as u32 as usize, FDSTAT_SIZE)?;
    // Layout: filetype u8, flags u16 at 2, rights_base u64 at 8,
    // rights_inheriting u64 at 16. Everything not set stays zero.
    stat.fill(0);
    stat[0] = FILETYPE_CHARACTER_DEVICE;
    write_u64_le(stat, 8, RIGHTS_FD_WRITE);
    Ok(Errno::Success.raw())
}

fn fd_seek<T: ShimView>(
    _caller: Caller<'_, T>,
    fd: i32,
    _offset: i64,
    _whence: i32,
    _new_offset: i32,
) -> i32 {
    // Character devices are not seekable.
    match Channel::from_fd(fd) {
        Some(_) => Errno::NotSup.raw(),
        None => Errno::BadF.raw(),
    }
}

fn fd_write<T: ShimView>(
    mut caller: Caller<'_, T>,
    fd: i32,
    iovs_offset: i32,
    iovs_count: i32,
    nwritten_offset: i32,
) -> wasmtime::Result<i32> {
    let Some(channel) = Channel::from_fd(fd) else {
        return Ok(Errno::BadF.raw());
    };
    let memory = exported_memory(&mut caller)?;
    let (data, state) = memory.data_and_store_mut(&mut caller);
    let (shim, console) = state.shim_parts();

    let mut written: u32 = 0;
    for index in 0..iovs_count as u32 as usize {
        let entry = iovs_offset as u32 as usize + index * CIOVEC_SIZE;
        let head = checked(data, "io vector entry", entry, CIOVEC_SIZE)?;
        let buffer_offset = read_u32_le(head, 0);
        let buffer_length = read_u32_le(head, 4);
        let bytes = checked(
            data,
            "io vector buffer",
            buffer_offset as usize,
            buffer_length as usize,
        )?;
        shim.consume(channel, bytes, console);
        written = written.wrapping_add(buffer_length);
    }

    let cell = checked_mut(data, "written-count cell", nwritten_offset as u32 as usize, 4)?;
    write_u32_le(cell, 0, written);
    Ok(Errno::Success.raw())
}

fn fd_close<T: ShimView>(_caller: Caller<'_, T>, fd: i32) -> i32 {
    // The consoles stay open for the lifetime of the instance.
    match Channel::from_fd(fd) {
        Some(_) => Errno::NotSup.raw(),
        None => Errno::BadF.raw(),
    }
}

fn exported_memory<T>(caller: &mut Caller<'_, T>) -> Result<Memory, ShimError> {
    match caller.get_export(MEMORY) {
        Some(Extern::Memory(memory)) => Ok(memory),
        _ => Err(ShimError::MemoryMissing),
    }
}

fn checked<'d>(
    data: &'d [u8],
    what: &'static str,
    offset: usize,
    length: usize,
) -> Result<&'d [u8], ShimError> {
    data.get(offset..offset + length)
        .ok_or(ShimError::OutOfBounds { what, offset, length })
}

fn checked_mut<'d>(
    data: &'d mut [u8],
    what: &'static str,
    offset: usize,
    length: usize,
) -> Result<&'d mut [u8], ShimError> {
    data.get_mut(offset..offset + length)
        .ok_or(ShimError::OutOfBounds { what, offset, length })
}
