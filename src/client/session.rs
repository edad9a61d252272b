//! Session Persistence
//!
//! Stores the bearer token and the signed-in user's profile. A session
//! backed by a file survives restarts; the file lives under the platform
//! data directory and uses the well-known keys `token` and `currentUser`
//! so existing session files from earlier client versions keep working.
//!
//! In-memory sessions never touch the filesystem and are meant for tests
//! and throwaway clients.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::shared::user::{AuthResponse, User};

/// Persisted session contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SessionState {
    /// Bearer token, present while signed in
    token: Option<String>,
    /// Cached profile of the signed-in user
    current_user: Option<User>,
    /// When the session was last written
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
}

/// Credential and profile store shared by all client services
#[derive(Debug)]
pub struct Session {
    state: RwLock<SessionState>,
    path: Option<PathBuf>,
}

impl Session {
    /// Create a session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            path: None,
        }
    }

    /// Load the session from the platform data directory
    ///
    /// Starts signed out when no session file exists yet.
    pub fn load_or_default() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Load a session backed by an explicit file path
    ///
    /// An unreadable or corrupt file is treated as signed out rather than
    /// failing startup; the file is overwritten on the next sign-in.
    pub fn with_path(path: PathBuf) -> Self {
        let state = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(
                        "[Session] ignoring unreadable session file {}: {}",
                        path.display(),
                        e
                    );
                    SessionState::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => SessionState::default(),
            Err(e) => {
                tracing::warn!("[Session] failed to read {}: {}", path.display(), e);
                SessionState::default()
            }
        };

        Self {
            state: RwLock::new(state),
            path: Some(path),
        }
    }

    /// Platform-specific session file path
    fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| std::env::temp_dir());
        path.push("xfdocs");
        path.push("session.json");
        path
    }

    /// Current bearer token, if signed in
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    /// Profile of the signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.read().current_user.clone()
    }

    /// Whether a bearer token is present
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Store the credentials of a successful login or registration
    pub fn set_credentials(&self, auth: &AuthResponse) -> io::Result<()> {
        let snapshot = {
            let mut state = self.write();
            state.token = Some(auth.token.clone());
            state.current_user = Some(User::from(auth));
            state.saved_at = Some(chrono::Utc::now().to_rfc3339());
            state.clone()
        };
        tracing::info!("[Session] credentials stored for {}", auth.username);
        self.persist(&snapshot)
    }

    /// Replace the bearer token, keeping the cached profile
    pub fn set_token(&self, token: Option<String>) -> io::Result<()> {
        let snapshot = {
            let mut state = self.write();
            state.token = token;
            state.saved_at = Some(chrono::Utc::now().to_rfc3339());
            state.clone()
        };
        self.persist(&snapshot)
    }

    /// Sign out: drop the credentials and delete the session file
    pub fn clear(&self) -> io::Result<()> {
        {
            let mut state = self.write();
            *state = SessionState::default();
        }
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        tracing::info!("[Session] cleared");
        Ok(())
    }

    fn persist(&self, state: &SessionState) -> io::Result<()> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(()),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(path, json)
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
