//! EntryStore — flat-file markdown storage
//!
//! Every call goes to disk; nothing is cached between requests. Writes to
//! the same title are serialized by a per-title lock.

use super::error::{WikiError, WikiResult};
use super::file_ops;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File metadata for a stored entry
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub title: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

pub struct EntryStore {
    entries_dir: PathBuf,
    write_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl EntryStore {
    /// Open a store rooted at `entries_dir`, creating the directory if needed
    pub fn new(entries_dir: PathBuf) -> WikiResult<Self> {
        std::fs::create_dir_all(&entries_dir)?;
        Ok(Self {
            entries_dir,
            write_locks: DashMap::new(),
        })
    }

    /// Get the entries directory path
    pub fn entries_dir(&self) -> &Path {
        &self.entries_dir
    }

    /// All entry titles currently on disk, sorted
    pub fn list_entries(&self) -> WikiResult<Vec<String>> {
        Ok(file_ops::list_titles(&self.entries_dir)?)
    }

    /// Content of the entry with exactly this title
    pub fn get_entry(&self, title: &str) -> WikiResult<String> {
        if !file_ops::is_valid_title(title) {
            return Err(WikiError::EntryNotFound(title.to_string()));
        }
        file_ops::read_entry(&self.entries_dir, title)?
            .ok_or_else(|| WikiError::EntryNotFound(title.to_string()))
    }

    /// Create or overwrite the entry for `title`
    pub fn save_entry(&self, title: &str, content: &str) -> WikiResult<()> {
        if !file_ops::is_valid_title(title) {
            return Err(WikiError::InvalidTitle(title.to_string()));
        }

        let lock = self
            .write_locks
            .entry(title.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let written = {
            let _guard = lock.lock();
            file_ops::write_entry(&self.entries_dir, title, content)
        };
        drop(lock);
        // Only the map's handle left: no writer holds or awaits this lock
        self.write_locks
            .remove_if(title, |_, l| Arc::strong_count(l) == 1);

        written?;
        log::info!("[WIKI] Saved entry \"{}\" ({} bytes)", title, content.len());
        Ok(())
    }

    /// Size and modification time of a stored entry
    pub fn entry_info(&self, title: &str) -> WikiResult<EntryInfo> {
        if !file_ops::is_valid_title(title) {
            return Err(WikiError::EntryNotFound(title.to_string()));
        }
        let metadata = match std::fs::metadata(file_ops::entry_path(&self.entries_dir, title)) {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(WikiError::EntryNotFound(title.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WikiError::EntryNotFound(title.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(EntryInfo {
            title: title.to_string(),
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        })
    }

    /// Populate the store from a seed directory. Existing entries are kept.
    pub fn seed_entries(&self, seed_dir: &Path) -> WikiResult<usize> {
        let copied = file_ops::copy_seed_entries(seed_dir, &self.entries_dir)?;
        if copied > 0 {
            log::info!("[WIKI] Seeded {} entries from {:?}", copied, seed_dir);
        }
        Ok(copied)
    }
}
