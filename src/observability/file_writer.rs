//! Rotating file writer with size-based rotation and backup retention.
//!
//! The terminal is the UI, so log lines go to a file instead. The writer is
//! cheap to clone; clones share one file handle behind a mutex, which is what
//! `tracing-subscriber` needs from a `MakeWriter`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Maximum file size before rotation (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// When the current file reaches the size threshold it is renamed to
/// `<name>.<timestamp>` and a fresh file is started. Backups beyond
/// [`MAX_BACKUP_FILES`] are removed, oldest first.
#[derive(Clone)]
pub struct FileWriter {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Lazily opened on first write.
    file: Option<File>,
    /// Bytes in the current file.
    size: u64,
    /// Rotation only happens between lines.
    at_line_start: bool,
}

impl FileWriter {
    /// Creates a writer for `file_path` with the default limits.
    ///
    /// The file is not opened until the first write.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                file_path,
                max_bytes,
                max_backups,
                file: None,
                size: 0,
                at_line_start: true,
            })),
        }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))
    }
}

impl Inner {
    fn open(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            if let Some(parent) = self.file_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&self.file_path)?;
            self.size = file.metadata().map(|m| m.len()).unwrap_or(0);
            self.file = Some(file);
        }

        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))
    }

    fn check_and_rotate(&mut self) -> io::Result<()> {
        if self.at_line_start && self.size >= self.max_bytes {
            self.file = None;
            self.rotate_files()?;
        }
        Ok(())
    }

    fn rotate_files(&mut self) -> io::Result<()> {
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.9f");
        let file_name = file_name(&self.file_path)?;

        let mut backup_path = self.file_path.with_file_name(format!("{file_name}.{timestamp}"));
        let mut attempt = 1;
        while backup_path.exists() {
            backup_path = self.file_path.with_file_name(format!("{file_name}.{timestamp}-{attempt}"));
            attempt += 1;
        }

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }
        self.size = 0;

        self.cleanup_old_backups()
    }

    /// Removes backups beyond the retention limit. Individual deletion errors
    /// are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let prefix = format!("{}.", file_name(&self.file_path)?);
        let parent_dir = match self.file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamp suffixes sort chronologically; newest first.
        backups.sort_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

fn file_name(path: &Path) -> io::Result<String> {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(String::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.lock()?;
        inner.open()?;
        inner.check_and_rotate()?;

        let written = inner.open()?.write(buf)?;
        inner.size += written as u64;
        if written > 0 {
            inner.at_line_start = buf[written - 1] == b'\n';
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.lock()?;
        match inner.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.inner.lock().map(|inner| inner.file_path.clone()).ok();
        f.debug_struct("FileWriter").field("file_path", &path).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn backups(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("app.log."))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn writes_append_to_one_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("app.log");
        let mut writer = FileWriter::new(path.clone());
        let mut clone = writer.clone();

        writeln!(writer, "first").unwrap();
        writeln!(clone, "second").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn rotates_at_threshold_and_keeps_limited_backups() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = FileWriter::with_limits(path.clone(), 32, 2);

        for i in 0..10 {
            writeln!(writer, "line {i:02} padded to twenty").unwrap();
        }
        writer.flush().unwrap();

        // Each line is 25 bytes, so every file holds two whole lines.
        let current = fs::read_to_string(&path).unwrap();
        assert_eq!(current, "line 08 padded to twenty\nline 09 padded to twenty\n");
        assert_eq!(backups(dir.path()).len(), 2);
    }

    #[test]
    fn existing_file_size_counts_toward_rotation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "x".repeat(64)).unwrap();

        let mut writer = FileWriter::with_limits(path.clone(), 64, 3);
        writeln!(writer, "opens existing").unwrap();
        writeln!(writer, "rotates").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "opens existing\nrotates\n");
        let rotated = backups(dir.path());
        assert_eq!(rotated.len(), 1);
        assert_eq!(fs::read_to_string(dir.path().join(&rotated[0])).unwrap(), "x".repeat(64));
    }
}
