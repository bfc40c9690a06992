//! JSON fixture loading.
//!
//! All non-session state (catalog, users, orders, settings) is read once at
//! startup from JSON files in the configured data directory.

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while loading a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The file could not be read.
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("failed to parse fixture {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and deserialize a JSON fixture file.
///
/// # Errors
///
/// Returns [`FixtureError`] if the file is missing, unreadable, or does not
/// deserialize into `T`.
pub fn load_fixture<T: DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| FixtureError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Serialize a value to pretty JSON and write it to a fixture file.
///
/// Used by the CLI seeder and the user-management command.
///
/// # Errors
///
/// Returns [`FixtureError`] if serialization or the write fails.
pub fn store_fixture<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), FixtureError> {
    let contents =
        serde_json::to_string_pretty(value).map_err(|source| FixtureError::Parse {
            path: path.display().to_string(),
            source,
        })?;

    std::fs::write(path, contents).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = std::env::temp_dir().join("shopsphere-fixture-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("numbers.json");

        store_fixture(&path, &vec![1, 2, 3]).unwrap();
        let loaded: Vec<i32> = load_fixture(&path).unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_file() {
        let result: Result<Vec<i32>, _> = load_fixture(Path::new("/nonexistent/missing.json"));
        assert!(matches!(result, Err(FixtureError::Io { .. })));
    }
}
