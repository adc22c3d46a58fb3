//! Persistent session store.
//!
//! The durable mirror of the in-memory session: a bearer token and the
//! serialized user profile, written and cleared together. The store is
//! read once at startup and rewritten on every session mutation.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::error::Error;
use crate::types::User;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

/// Session data loaded from the store.
#[derive(Debug, Clone)]
pub struct StoredSession {
    /// The bearer token, treated as opaque.
    pub token: String,
    /// The persisted user profile.
    pub user: User,
}

/// File-backed session store.
///
/// Holds two entries under one directory: the bearer token (plain
/// text, 0o600 on Unix) and the user profile (JSON). The two entries
/// are a unit; [`SessionStore::load`] reports absence unless both are
/// present and well-formed.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open the store at the platform default data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined.
    pub fn open_default() -> Result<Self, Error> {
        let dirs = ProjectDirs::from("", "", "pustaka").ok_or_else(|| {
            Error::Storage(io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine data directory",
            ))
        })?;

        Ok(Self {
            dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Open a store at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist a token and user profile, replacing any existing entries.
    pub fn save(&self, token: &str, user: &User) -> Result<(), Error> {
        fs::create_dir_all(&self.dir).map_err(Error::Storage)?;

        let token_path = self.dir.join(TOKEN_FILE);
        let user_path = self.dir.join(USER_FILE);

        let json = serde_json::to_string_pretty(user).map_err(|e| {
            Error::Storage(io::Error::new(io::ErrorKind::InvalidData, e))
        })?;

        fs::write(&token_path, token).map_err(Error::Storage)?;
        fs::write(&user_path, &json).map_err(Error::Storage)?;

        // The token grants account access; keep it private (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&token_path)
                .map_err(Error::Storage)?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&token_path, perms).map_err(Error::Storage)?;
        }

        debug!(dir = %self.dir.display(), "session saved");
        Ok(())
    }

    /// Load the stored session, if any.
    ///
    /// Tolerates corrupted or partially-written entries: if either
    /// entry is missing, or the user payload cannot be parsed, both
    /// entries are removed and `None` is returned. A parse failure is
    /// never propagated to the caller.
    pub fn load(&self) -> Option<StoredSession> {
        let token = match fs::read_to_string(self.dir.join(TOKEN_FILE)) {
            Ok(t) => t.trim().to_string(),
            Err(_) => return None,
        };

        if token.is_empty() {
            warn!("stored token is empty, clearing session entries");
            let _ = self.clear();
            return None;
        }

        let user_json = match fs::read_to_string(self.dir.join(USER_FILE)) {
            Ok(j) => j,
            Err(_) => {
                // Token without a user profile violates the pairing
                // invariant; repair by clearing both.
                warn!("stored token has no user profile, clearing session entries");
                let _ = self.clear();
                return None;
            }
        };

        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => Some(StoredSession { token, user }),
            Err(e) => {
                warn!(error = %e, "stored user profile is corrupt, clearing session entries");
                let _ = self.clear();
                None
            }
        }
    }

    /// Remove both entries. Idempotent; missing entries are not an error.
    pub fn clear(&self) -> Result<(), Error> {
        for name in [TOKEN_FILE, USER_FILE] {
            let path = self.dir.join(name);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::Storage(e)),
            }
        }
        debug!(dir = %self.dir.display(), "session cleared");
        Ok(())
    }
}
