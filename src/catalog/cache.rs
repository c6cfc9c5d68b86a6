use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::song::Song;

/// File name of the cache inside the data directory
pub const CACHE_FILE_NAME: &str = "songs.json";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Cache file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk cache format
#[derive(Debug, Deserialize)]
struct CacheFile {
    #[serde(default)]
    songs: Vec<Song>,
}

#[derive(Serialize)]
struct CacheFileRef<'a> {
    songs: &'a [Song],
}

/// Read the cached song list
///
/// # Errors
///
/// Returns [`CacheError::Missing`] if no cache has been written yet,
/// [`CacheError::Corrupt`] if the file does not parse, or
/// [`CacheError::Io`] if it cannot be read.
pub fn read_cache(path: &Path) -> Result<Vec<Song>, CacheError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CacheError::Missing(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let file: CacheFile = serde_json::from_str(&content).map_err(|source| CacheError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.songs)
}

/// Replace the cache with `songs`.
///
/// The file is written next to its destination and renamed into place, so
/// a reader never sees a half-written cache and a failed write leaves the
/// previous cache untouched. Missing parent directories are created.
///
/// # Errors
///
/// Returns [`CacheError::Io`] if the directory, temporary file, or rename fails.
pub fn write_cache(path: &Path, songs: &[Song]) -> Result<(), CacheError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, &CacheFileRef { songs })
            .map_err(std::io::Error::from)?;
        writer.flush()?;
    }
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_cache(&dir.path().join(CACHE_FILE_NAME));
        assert!(matches!(result, Err(CacheError::Missing(_))));
    }

    #[test]
    fn test_corrupt_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        std::fs::write(&path, "{\"songs\": [").unwrap();

        let result = read_cache(&path);
        assert!(matches!(result, Err(CacheError::Corrupt { .. })));
    }

    #[test]
    fn test_cache_without_songs_key_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        std::fs::write(&path, "{}").unwrap();

        assert!(read_cache(&path).unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CACHE_FILE_NAME);
        let songs = vec![
            Song::new(1, "千本桜").with_aliases(["senbonzakura"]),
            Song::new(2, "Title B"),
        ];

        write_cache(&path, &songs).unwrap();
        assert_eq!(read_cache(&path).unwrap(), songs);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("{\n  \"songs\": ["));
        // Non-ASCII text is written as-is
        assert!(raw.contains("千本桜"));
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);

        write_cache(&path, &[Song::new(1, "Old"), Song::new(2, "Older")]).unwrap();
        write_cache(&path, &[Song::new(3, "New")]).unwrap();

        let songs = read_cache(&path).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "New");
    }
}
