//! Store data: everything the import implementations reach for.

use std::fs;
use std::path::PathBuf;

use doombox_abi::{ConsoleSink, FRAME_BYTES_PER_PIXEL};
use doombox_wasi::{ShimView, WasiShim};

use crate::clock::{Clock, SystemClock};
use crate::config::ModuleConfig;
use crate::error::HostError;
use crate::frontend::{Frontend, HeadlessFrontend, LogConsole};
use crate::save_store::SaveStore;

/// Frame geometry announced by the module through `loading.onGameInit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub width: i32,
    pub height: i32,
}

impl FrameInfo {
    /// How many bytes one frame occupies at the draw offset.
    pub fn byte_length(&self) -> usize {
        self.width as usize * self.height as usize * FRAME_BYTES_PER_PIXEL
    }
}

/// The ordered archive blobs offered to the engine, IWAD first.
#[derive(Debug, Default)]
pub struct WadStash {
    archives: Vec<Vec<u8>>,
}

impl WadStash {
    /// Reads every configured archive into memory, in order.
    pub fn load(paths: &[PathBuf]) -> Result<Self, HostError> {
        let mut archives = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = fs::read(path).map_err(|source| HostError::ArchiveRead {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded archive");
            archives.push(bytes);
        }
        Ok(Self { archives })
    }

    /// Builds a stash from already-loaded blobs.
    pub fn from_blobs(archives: Vec<Vec<u8>>) -> Self {
        Self { archives }
    }

    pub fn count(&self) -> usize {
        self.archives.len()
    }

    pub fn total_bytes(&self) -> usize {
        self.archives.iter().map(Vec::len).sum()
    }

    pub fn archives(&self) -> &[Vec<u8>] {
        &self.archives
    }
}

/// Host-side collaborators an embedder hands to the instance.
///
/// The defaults make a working headless host: frames are dropped, console
/// lines land in the log, time comes from the system clock.
pub struct Collaborators {
    pub frontend: Box<dyn Frontend>,
    pub console: Box<dyn ConsoleSink>,
    pub clock: Box<dyn Clock>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            frontend: Box::new(HeadlessFrontend::new()),
            console: Box::new(LogConsole),
            clock: Box::new(SystemClock::new()),
        }
    }
}

/// Data owned by the instance's store, reachable from every import call.
pub struct HostState {
    pub(crate) wads: WadStash,
    pub(crate) saves: Box<dyn SaveStore>,
    pub(crate) frontend: Box<dyn Frontend>,
    pub(crate) console: Box<dyn ConsoleSink>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) wasi: WasiShim,
    pub(crate) frame: Option<FrameInfo>,
}

impl HostState {
    pub(crate) fn new(config: &ModuleConfig, collaborators: Collaborators) -> Result<Self, HostError> {
        let wads = WadStash::load(&config.wads)?;
        Ok(Self {
            wads,
            saves: config.saves.build(),
            frontend: collaborators.frontend,
            console: collaborators.console,
            clock: collaborators.clock,
            wasi: WasiShim::new(config.exit_policy),
            frame: None,
        })
    }

    /// Frame format the module announced, if initialization ran.
    pub fn frame(&self) -> Option<FrameInfo> {
        self.frame
    }

    /// Exit code recorded by the WASI shim, if the guest requested exit.
    pub fn exit_code(&self) -> Option<i32> {
        self.wasi.exit_code()
    }
}

impl ShimView for HostState {
    fn shim_parts(&mut self) -> (&mut WasiShim, &mut dyn ConsoleSink) {
        (&mut self.wasi, self.console.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_byte_length_is_four_per_pixel() {
        let frame = FrameInfo { width: 8, height: 4 };
        assert_eq!(frame.byte_length(), 128);
    }

    #[test]
    fn stash_accounts_bytes_across_archives() {
        let stash = WadStash::from_blobs(vec![b"iwad".to_vec(), b"pw".to_vec()]);
        assert_eq!(stash.count(), 2);
        assert_eq!(stash.total_bytes(), 6);
    }

    #[test]
    fn loading_a_missing_archive_names_the_path() {
        let missing = PathBuf::from("/definitely/not/here.wad");
        let err = WadStash::load(&[missing.clone()]).unwrap_err();
        match err {
            HostError::ArchiveRead { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
