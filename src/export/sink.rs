//! Destinations for exported files.
//!
//! In a browser the export would trigger a download. Here a sink receives
//! the finished file and reports where it ended up.

use std::io;
use std::path::PathBuf;
use tracing::info;

/// Receives a finished export file.
pub trait DownloadSink {
    /// Deliver `contents` under `file_name`; returns a display location.
    fn deliver(&mut self, file_name: &str, contents: &[u8]) -> io::Result<String>;
}

/// Writes export files into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, file_name: &str, contents: &[u8]) -> io::Result<String> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, contents)?;
        info!(path = %path.display(), bytes = contents.len(), "export written");
        Ok(path.display().to_string())
    }
}

/// Keeps delivered files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivered files in order, as `(file_name, contents)`.
    pub fn files(&self) -> &[(String, Vec<u8>)] {
        &self.files
    }

    /// Contents of the most recent file as UTF-8, if any.
    pub fn last_text(&self) -> Option<String> {
        self.files
            .last()
            .map(|(_, bytes)| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, file_name: &str, contents: &[u8]) -> io::Result<String> {
        self.files.push((file_name.to_string(), contents.to_vec()));
        Ok(file_name.to_string())
    }
}

impl<S: DownloadSink + ?Sized> DownloadSink for &mut S {
    fn deliver(&mut self, file_name: &str, contents: &[u8]) -> io::Result<String> {
        (**self).deliver(file_name, contents)
    }
}
