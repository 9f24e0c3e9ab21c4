//! File operations for wiki entries
//!
//! One `{title}.md` file per entry, directly inside the entries directory.
//! Titles double as file names, so they are validated before touching disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const ENTRY_EXTENSION: &str = "md";
pub const MAX_TITLE_CHARS: usize = 200;
/// Most file systems cap a file name at 255 bytes. The longest name derived
/// from a title is the temp file `.{title}.md.tmp`.
pub const MAX_TITLE_BYTES: usize = 255 - ".".len() - ".".len() - ENTRY_EXTENSION.len() - ".tmp".len();

/// Whether a title can be used as a file name inside the entries directory
pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty()
        && title.chars().count() <= MAX_TITLE_CHARS
        && title.len() <= MAX_TITLE_BYTES
        && !title.starts_with('.')
        && !title.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}

/// Path of the markdown file backing `title`
pub fn entry_path(entries_dir: &Path, title: &str) -> PathBuf {
    entries_dir.join(format!("{}.{}", title, ENTRY_EXTENSION))
}

/// Hidden sibling used for write-then-rename
fn temp_path(entries_dir: &Path, title: &str) -> PathBuf {
    entries_dir.join(format!(".{}.{}.tmp", title, ENTRY_EXTENSION))
}

/// Write an entry file. The content lands in a hidden temp file first and is
/// renamed over the target so readers never observe a partial write.
pub fn write_entry(entries_dir: &Path, title: &str, content: &str) -> io::Result<()> {
    fs::create_dir_all(entries_dir)?;
    let tmp = temp_path(entries_dir, title);
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }
    if let Err(e) = fs::rename(&tmp, entry_path(entries_dir, title)) {
        fs::remove_file(&tmp).ok();
        return Err(e);
    }
    Ok(())
}

/// Read an entry file, returning None if it doesn't exist
pub fn read_entry(entries_dir: &Path, title: &str) -> io::Result<Option<String>> {
    match fs::read_to_string(entry_path(entries_dir, title)) {
        Ok(content) => Ok(Some(content)),
        // A name the file system cannot hold cannot name a stored entry either
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::InvalidFilename) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// List entry titles (file stems of `*.md` files), sorted
pub fn list_titles(entries_dir: &Path) -> io::Result<Vec<String>> {
    let mut titles = Vec::new();

    if !entries_dir.exists() {
        return Ok(titles);
    }

    for entry in fs::read_dir(entries_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        // Skip hidden files (including in-flight temp files)
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) if !n.starts_with('.') => n,
            _ => continue,
        };
        let stem = name
            .strip_suffix(ENTRY_EXTENSION)
            .and_then(|rest| rest.strip_suffix('.'));
        if let Some(title) = stem {
            if !title.is_empty() {
                titles.push(title.to_string());
            }
        }
    }

    titles.sort();
    Ok(titles)
}

/// Copy every `*.md` file from `seed_dir` into `entries_dir`, skipping files
/// that already exist. Returns the number of files copied.
pub fn copy_seed_entries(seed_dir: &Path, entries_dir: &Path) -> io::Result<usize> {
    if !seed_dir.exists() {
        return Ok(0);
    }
    fs::create_dir_all(entries_dir)?;

    let mut copied = 0;
    for title in list_titles(seed_dir)? {
        let target = entry_path(entries_dir, &title);
        if target.exists() {
            continue;
        }
        fs::copy(entry_path(seed_dir, &title), &target)?;
        copied += 1;
    }
    Ok(copied)
}
