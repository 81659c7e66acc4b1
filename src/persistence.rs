/// JSON file persistence with atomic replacement.
///
/// Writers never touch the target file directly: the document is written to
/// `<target>.tmp`, synced, and renamed onto the target. A reader therefore
/// sees either the previous document or the new one, never a partial write.
use crate::error::PersistError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Serialize `value` as pretty JSON and atomically replace `path` with it
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = stage(path, json.as_bytes())?;
    commit(&tmp, path)
}

/// Read and parse a JSON document. `Ok(None)` if the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| PersistError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Sibling temp file used while replacing `path`
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write the full document to the temp file and flush it to disk
pub(crate) fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf, PersistError> {
    let tmp = temp_path(path);
    let io_err = |source| PersistError::Io {
        path: tmp.clone(),
        source,
    };

    let mut file = File::create(&tmp).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;

    Ok(tmp)
}

/// Rename the staged temp file onto the target
pub(crate) fn commit(tmp: &Path, path: &Path) -> Result<(), PersistError> {
    fs::rename(tmp, path).map_err(|source| {
        // Leave no stray temp file behind; the target is untouched either way
        let _ = fs::remove_file(tmp);
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScratchDir;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_then_read() {
        let dir = ScratchDir::new("persist_write_read");
        let path = dir.path().join("doc.json");
        let doc = Doc {
            name: "a".to_string(),
            value: 7,
        };

        write_json_atomic(&path, &doc).unwrap();

        assert_eq!(read_json::<Doc>(&path).unwrap(), Some(doc));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_output_is_pretty_printed() {
        let dir = ScratchDir::new("persist_pretty");
        let path = dir.path().join("doc.json");
        write_json_atomic(&path, &Doc { name: "x".to_string(), value: 1 }).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"name\": \"x\""));
    }

    #[test]
    fn test_crash_before_rename_keeps_previous_file() {
        let dir = ScratchDir::new("persist_crash");
        let path = dir.path().join("doc.json");
        let original = Doc {
            name: "good".to_string(),
            value: 1,
        };
        write_json_atomic(&path, &original).unwrap();

        // Simulate a crash: the temp file is written (even half-written) but
        // the rename never happens.
        stage(&path, b"{\"name\": \"bro").unwrap();

        assert_eq!(read_json::<Doc>(&path).unwrap(), Some(original));
        assert!(temp_path(&path).exists());
    }

    #[test]
    fn test_next_write_replaces_stale_temp_file() {
        let dir = ScratchDir::new("persist_stale_tmp");
        let path = dir.path().join("doc.json");
        stage(&path, b"garbage").unwrap();

        let doc = Doc {
            name: "fresh".to_string(),
            value: 2,
        };
        write_json_atomic(&path, &doc).unwrap();

        assert_eq!(read_json::<Doc>(&path).unwrap(), Some(doc));
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = ScratchDir::new("persist_missing");
        let result = read_json::<Doc>(&dir.path().join("nope.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = ScratchDir::new("persist_malformed");
        let path = dir.path().join("doc.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Doc>(&path).unwrap_err();
        assert!(matches!(err, PersistError::Parse { .. }));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = ScratchDir::new("persist_no_dir");
        let path = dir.path().join("missing").join("doc.json");

        let err = write_json_atomic(&path, &Doc { name: String::new(), value: 0 }).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
        assert!(!path.exists());
    }
}
