//! JSON snapshot of the account store.
//!
//! The CLI keeps accounts between invocations in a single JSON file. A
//! missing file is an empty store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use kitchen_accounts::{Account, AccountStore, InMemoryAccountStore};

/// Errors reading or writing the snapshot file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed snapshot {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    accounts: Vec<&'a Account>,
}

#[derive(Deserialize)]
struct Snapshot {
    accounts: Vec<Account>,
}

/// Load the account store from `path`.
///
/// # Errors
///
/// Returns `StoreError` if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<InMemoryAccountStore, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No snapshot, starting empty");
            return Ok(InMemoryAccountStore::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_owned(),
                source,
            });
        }
    };

    let snapshot: Snapshot = serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_owned(),
        source,
    })?;

    debug!(path = %path.display(), accounts = snapshot.accounts.len(), "Snapshot loaded");
    Ok(snapshot.accounts.into_iter().collect())
}

/// Write the account store to `path`.
///
/// The snapshot is written to a sibling temporary file and renamed into
/// place, so a failed write leaves the previous snapshot intact.
///
/// # Errors
///
/// Returns `StoreError` if serialization or any file operation fails.
pub fn save(path: &Path, store: &InMemoryAccountStore) -> Result<(), StoreError> {
    let snapshot = SnapshotRef {
        accounts: store.list_all(),
    };
    let json = serde_json::to_string_pretty(&snapshot).map_err(|source| StoreError::Json {
        path: path.to_owned(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    let io_err = |source| StoreError::Io {
        path: path.to_owned(),
        source,
    };
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;

    debug!(path = %path.display(), accounts = store.len(), "Snapshot saved");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kitchen_core::{ActivationCode, Email, Role};

    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("kitchen-snapshot-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let store = load(&temp_path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_accounts() {
        let path = temp_path();

        let mut staff = Account::new(Email::parse("staff@gmail.com").unwrap())
            .with_password("Password1")
            .unwrap();
        staff.role = Role::KitchenStaff;
        staff.activation_code = Some(ActivationCode::new("Test123"));
        let store: InMemoryAccountStore = [staff.clone()].into_iter().collect();

        save(&path, &store).unwrap();
        let restored = load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let account = restored.find_by_email("staff@gmail.com").unwrap();
        assert_eq!(account, &staff);
        assert!(account.password_matches("Password1"));
    }

    #[test]
    fn test_malformed_snapshot() {
        let path = temp_path();
        fs::write(&path, "{ not json").unwrap();

        let result = load(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(StoreError::Json { .. })));
    }
}
