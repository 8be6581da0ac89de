// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Replacing a configuration file on disk.
//!
//! Output goes to `<file>.new` first. Only after the render completed and the
//! staging file is synced does the previous file move to a timestamped backup
//! (`<file>.2026-01-31.23-59-59`) and the staging file take its place. A
//! failed render leaves the partial output in `<file>.new` and the original
//! untouched.

use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const BACKUP_TIMESTAMP: &str = "%Y-%m-%d.%H-%M-%S";

/// Staging and backup paths for one file replacement.
#[derive(Debug, Clone)]
pub struct StoreFileMover {
    target: PathBuf,
    timestamp: DateTime<Local>,
}

impl StoreFileMover {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            timestamp: Local::now(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// `<file>.new`
    pub fn staging_path(&self) -> PathBuf {
        with_suffix(&self.target, "new")
    }

    /// `<file>.<timestamp>`
    pub fn backup_path(&self) -> PathBuf {
        let stamp = self.timestamp.format(BACKUP_TIMESTAMP).to_string();
        with_suffix(&self.target, &stamp)
    }

    /// Create (truncating) the staging file.
    pub fn writer(&self) -> io::Result<BufWriter<File>> {
        if let Some(parent) = self.target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let path = self.staging_path();
        debug!(path = %path.display(), "open staging file");
        Ok(BufWriter::new(File::create(path)?))
    }

    /// Swap the staging file in, optionally keeping the previous file.
    ///
    /// Returns the backup path when one was written.
    pub fn move_into_place(&self, backup: bool) -> io::Result<Option<PathBuf>> {
        let mut saved = None;
        if self.target.exists() {
            if backup {
                let backup_path = self.backup_path();
                fs::rename(&self.target, &backup_path)?;
                info!(backup = %backup_path.display(), "previous configuration saved");
                saved = Some(backup_path);
            } else {
                fs::remove_file(&self.target)?;
            }
        }
        fs::rename(self.staging_path(), &self.target)?;
        Ok(saved)
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_paths() {
        let mover = StoreFileMover::new("/etc/app/server.xml");
        assert_eq!(mover.staging_path(), PathBuf::from("/etc/app/server.xml.new"));
        let backup = mover.backup_path();
        let name = backup.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("server.xml."));
        assert_eq!(name.len(), "server.xml.".len() + "2026-01-31.23-59-59".len());
    }

    #[test]
    fn test_replace_with_backup() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("server.xml");
        fs::write(&target, "old").unwrap();

        let mover = StoreFileMover::new(&target);
        {
            let mut w = mover.writer().unwrap();
            w.write_all(b"new").unwrap();
            w.flush().unwrap();
        }
        let backup = mover.move_into_place(true).unwrap().unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(fs::read_to_string(backup).unwrap(), "old");
        assert!(!mover.staging_path().exists());
    }

    #[test]
    fn test_replace_without_backup_or_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("conf").join("server.xml");

        let mover = StoreFileMover::new(&target);
        {
            let mut w = mover.writer().unwrap();
            w.write_all(b"first").unwrap();
            w.flush().unwrap();
        }
        assert!(mover.move_into_place(true).unwrap().is_none());
        assert_eq!(fs::read_to_string(&target).unwrap(), "first");
    }
}
