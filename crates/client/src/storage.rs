//! Session persisted as a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use stockdesk_auth::{SessionError, StoredSession, TokenStorage};

#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path).map_err(|e| {
            SessionError::Storage(format!("failed to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| SessionError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SessionError::Storage(format!("failed creating directory {}: {e}", parent.display()))
            })?;
        }
        let payload = serde_json::to_vec_pretty(session)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        fs::write(&self.path, payload).map_err(|e| {
            SessionError::Storage(format!("failed writing {}: {e}", self.path.display()))
        })
    }

    fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                SessionError::Storage(format!("failed to remove {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_auth::{Role, User};
    use stockdesk_core::UserId;

    fn session() -> StoredSession {
        StoredSession {
            token: "tok".into(),
            user: User {
                id: UserId::new(1),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                role: Role::Administrador,
                created_at: None,
            },
        }
    }

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("stockdesk").join("session.json"));
        assert_eq!(storage.load().unwrap(), None);

        storage.save(&session()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(session()));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
        storage.clear().unwrap();
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let err = FileTokenStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt(_)));
    }
}
