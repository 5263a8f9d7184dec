//! File-backed save repository.
//!
//! One JSON file per slot under a platform data directory, wrapped with a
//! SHA-256 payload checksum so a truncated or hand-edited file fails loud
//! instead of loading half a game.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::{RepositoryError, Result};
use super::save::SaveData;
use super::traits::SaveRepository;

#[derive(Serialize, Deserialize)]
struct SaveFile {
    checksum: String,
    save: SaveData,
}

/// Stores each slot as `<dir>/<slot>.json`.
pub struct FileSaveRepository {
    dir: PathBuf,
}

impl FileSaveRepository {
    /// Repository over an explicit directory, created if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Repository under the platform data directory for the game.
    pub fn default_dir() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "crumbs")
            .ok_or(RepositoryError::NoSaveDirectory)?;
        Self::new(dirs.data_dir().join("saves"))
    }

    fn path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    fn checksum(save: &SaveData) -> Result<String> {
        let payload = serde_json::to_vec(save)?;
        Ok(hex::encode(Sha256::digest(&payload)))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, save: &SaveData) -> Result<()> {
        let file = SaveFile {
            checksum: Self::checksum(save)?,
            save: save.clone(),
        };
        let path = self.path(slot);
        // Write-then-rename keeps a crash from leaving a torn save.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&file)?)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(slot, path = %path.display(), "save written");
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveData>> {
        let path = self.path(slot);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: SaveFile = serde_json::from_slice(&raw)?;
        if Self::checksum(&file.save)? != file.checksum {
            return Err(RepositoryError::ChecksumMismatch {
                slot: slot.to_string(),
            });
        }
        Ok(Some(file.save))
    }

    fn exists(&self, slot: &str) -> bool {
        self.path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        match fs::remove_file(self.path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                slots.push(stem.to_string());
            }
        }
        slots.sort();
        Ok(slots)
    }
}
