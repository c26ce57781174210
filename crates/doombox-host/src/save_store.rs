//! Slot-addressed persistence behind the `gameSaving` imports.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage for save-game records, one byte blob per slot.
///
/// The engine's menu offers six slots but the protocol allows any
/// non-negative slot number. Implementations never fault the instance: a
/// failed read reports the slot as absent and a failed write reports zero
/// bytes persisted, which the engine's own save path surfaces to the player.
pub trait SaveStore {
    /// Byte size of the record in `slot`; 0 means no save exists.
    fn size(&mut self, slot: u32) -> usize;

    /// The record stored in `slot`, if any.
    fn read(&mut self, slot: u32) -> Option<Vec<u8>>;

    /// Persists `bytes` as the new record for `slot`, returning how many
    /// bytes were actually persisted.
    fn write(&mut self, slot: u32, bytes: &[u8]) -> usize;
}

/// Volatile store; saves live for the lifetime of the instance.
#[derive(Debug, Default)]
pub struct MemSaveStore {
    slots: HashMap<u32, Vec<u8>>,
}

impl MemSaveStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemSaveStore {
    fn size(&mut self, slot: u32) -> usize {
        self.slots.get(&slot).map_or(0, Vec::len)
    }

    fn read(&mut self, slot: u32) -> Option<Vec<u8>> {
        self.slots.get(&slot).cloned()
    }

    fn write(&mut self, slot: u32, bytes: &[u8]) -> usize {
        self.slots.insert(slot, bytes.to_vec());
        bytes.len()
    }
}

/// Directory-backed store using the engine's native save file names,
/// `doomsav<slot>.dsg`.
#[derive(Debug)]
pub struct DirSaveStore {
    dir: PathBuf,
}

impl DirSaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: u32) -> PathBuf {
        self.dir.join(format!("doomsav{slot}.dsg"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveStore for DirSaveStore {
    fn size(&mut self, slot: u32) -> usize {
        match fs::metadata(self.slot_path(slot)) {
            Ok(meta) => meta.len() as usize,
            Err(_) => 0,
        }
    }

    fn read(&mut self, slot: u32) -> Option<Vec<u8>> {
        let path = self.slot_path(slot);
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => None,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "save file unreadable; treating slot as empty");
                None
            }
        }
    }

    fn write(&mut self, slot: u32, bytes: &[u8]) -> usize {
        if let Err(error) = fs::create_dir_all(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), %error, "cannot create save directory");
            return 0;
        }
        let path = self.slot_path(slot);
        match fs::write(&path, bytes) {
            Ok(()) => bytes.len(),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "save write failed");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemSaveStore::new();
        assert_eq!(store.size(0), 0);
        assert_eq!(store.write(0, b"episode one"), 11);
        assert_eq!(store.size(0), 11);
        assert_eq!(store.read(0).as_deref(), Some(&b"episode one"[..]));
        assert_eq!(store.read(1), None);
    }

    #[test]
    fn memory_store_overwrites_in_place() {
        let mut store = MemSaveStore::new();
        store.write(2, b"first");
        store.write(2, b"second!");
        assert_eq!(store.read(2).as_deref(), Some(&b"second!"[..]));
    }

    #[test]
    fn dir_store_round_trips_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirSaveStore::new(dir.path());
        assert_eq!(store.size(3), 0);
        assert_eq!(store.write(3, b"nightmare"), 9);
        assert!(dir.path().join("doomsav3.dsg").exists());
        assert_eq!(store.size(3), 9);
        assert_eq!(store.read(3).as_deref(), Some(&b"nightmare"[..]));
    }

    #[test]
    fn dir_store_reports_absent_slots() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirSaveStore::new(dir.path());
        assert_eq!(store.read(5), None);
    }

    #[test]
    fn dir_store_creates_the_directory_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("saves");
        let mut store = DirSaveStore::new(&nested);
        assert_eq!(store.write(0, b"x"), 1);
        assert!(nested.join("doomsav0.dsg").exists());
    }
}
