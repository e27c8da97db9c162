//! Filesystem log sources
//!
//! Enumerates log folders, wraps files as [`LogSource`]s and loads TOML
//! playlists that name the folders to replay. Each folder is one batch, the
//! same as one folder selection in a picker.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::library::{GameLibrary, LogKind, LogSource};

/// Log file on disk, read when the batch is loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLog {
    path: PathBuf,
    name: String,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FileLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> Result<String, String> {
        fs::read_to_string(&self.path).map_err(|e| e.to_string())
    }
}

/// Every `.viz.txt` / `.moves.txt` file under `dir` (recursive), sorted by path
pub fn collect_log_files(dir: &Path) -> Result<Vec<FileLog>, String> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()));
    }
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    Ok(paths.into_iter().map(FileLog::new).collect())
}

fn collect_recursive(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read {}: {}", dir.display(), e))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_recursive(&path, paths)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| LogKind::from_file_name(n).is_some())
        {
            paths.push(path);
        }
    }
    Ok(())
}

/// Folders and loose files to load, in order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Playlist {
    pub viz_dirs: Vec<PathBuf>,
    pub moves_dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

impl Playlist {
    pub fn is_empty(&self) -> bool {
        self.viz_dirs.is_empty() && self.moves_dirs.is_empty() && self.files.is_empty()
    }

    /// Append another playlist's entries after this one's
    pub fn extend(&mut self, other: Playlist) {
        self.viz_dirs.extend(other.viz_dirs);
        self.moves_dirs.extend(other.moves_dirs);
        self.files.extend(other.files);
    }

    /// One batch per folder (viz folders first), then one batch of loose files
    pub fn batches(&self) -> Result<Vec<Vec<FileLog>>, String> {
        let mut batches = Vec::new();
        for dir in self.viz_dirs.iter().chain(&self.moves_dirs) {
            batches.push(collect_log_files(dir)?);
        }
        if !self.files.is_empty() {
            batches.push(self.files.iter().cloned().map(FileLog::new).collect());
        }
        Ok(batches)
    }
}

/// Load every batch of `playlist`, in order, into a fresh library
pub fn load_library(playlist: &Playlist) -> Result<GameLibrary, String> {
    let mut library = GameLibrary::default();
    for batch in playlist.batches()? {
        library.load_batch(&batch).map_err(|e| e.to_string())?;
    }
    Ok(library)
}

/// Load a playlist; relative paths are resolved against its directory
pub fn load_playlist(path: &Path) -> Result<Playlist, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let playlist: Playlist =
        toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let base = path.parent().unwrap_or(Path::new(""));
    let resolve = |paths: Vec<PathBuf>| -> Vec<PathBuf> {
        paths
            .into_iter()
            .map(|p| if p.is_absolute() { p } else { base.join(p) })
            .collect()
    };

    Ok(Playlist {
        viz_dirs: resolve(playlist.viz_dirs),
        moves_dirs: resolve(playlist.moves_dirs),
        files: resolve(playlist.files),
    })
}
