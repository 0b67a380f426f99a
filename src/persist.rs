//! Whole-file JSON persistence shared by the task and category stores.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// What a load attempt found on disk.
///
/// Callers that want the lenient behaviour use [`LoadOutcome::or_default`];
/// the variants stay distinct so an absent file and a corrupt one can be told
/// apart.
#[derive(Debug, PartialEq)]
pub enum LoadOutcome<T> {
    Absent,
    Corrupt(String),
    Loaded(T),
}

impl<T: Default> LoadOutcome<T> {
    pub fn or_default(self) -> T {
        match self {
            LoadOutcome::Loaded(value) => value,
            LoadOutcome::Absent | LoadOutcome::Corrupt(_) => T::default(),
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> LoadOutcome<T> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return LoadOutcome::Absent,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unreadable data file, starting empty");
            return LoadOutcome::Corrupt(err.to_string());
        }
    };

    match serde_json::from_str(&data) {
        Ok(value) => LoadOutcome::Loaded(value),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "malformed data file, starting empty");
            LoadOutcome::Corrupt(err.to_string())
        }
    }
}

/// Overwrite `path` with pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_absent() {
        let temp = TempDir::new().unwrap();
        let outcome: LoadOutcome<Vec<String>> = read_json(&temp.path().join("nope.json"));
        assert_eq!(outcome, LoadOutcome::Absent);
    }

    #[test]
    fn garbage_is_corrupt_not_absent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "[{\"task\": ").unwrap();

        let outcome: LoadOutcome<Vec<String>> = read_json(&path);
        assert!(matches!(outcome, LoadOutcome::Corrupt(_)));
        assert!(outcome.or_default().is_empty());
    }

    #[test]
    fn write_is_pretty_and_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/list.json");
        write_json(&path, &vec!["a", "b"]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        let back: LoadOutcome<Vec<String>> = read_json(&path);
        assert_eq!(back, LoadOutcome::Loaded(vec!["a".to_string(), "b".to_string()]));
    }
}
