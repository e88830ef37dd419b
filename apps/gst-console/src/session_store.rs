//! Where the console keeps the login session between runs

use crate::error::ConsoleError;
use chrono::Utc;
use gst_types::{Session, SessionProvider};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Persistent session storage; reading goes through [`SessionProvider`]
pub trait SessionStore: SessionProvider {
    fn save(&self, session: &Session) -> Result<(), ConsoleError>;

    /// Remove any stored session. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), ConsoleError>;
}

/// JSON file holding `{ token, role, stored_at }`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Session>, ConsoleError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConsoleError::Session(e.to_string())),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ConsoleError::Session(format!("{}: {}", self.path.display(), e)))
    }
}

impl SessionProvider for FileSessionStore {
    fn session(&self) -> Option<Session> {
        match self.read() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring unreadable session file");
                None
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &Session) -> Result<(), ConsoleError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConsoleError::Session(e.to_string()))?;
        }

        let stored = Session {
            stored_at: Some(Utc::now()),
            ..session.clone()
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| ConsoleError::Session(e.to_string()))?;
        write_private(&self.path, &json).map_err(|e| ConsoleError::Session(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    fn clear(&self) -> Result<(), ConsoleError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ConsoleError::Session(e.to_string())),
        }
    }
}

/// Write `contents` to `path`, readable by the owner only on unix
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // mode() only applies to new files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }
}

impl SessionProvider for MemorySessionStore {
    fn session(&self) -> Option<Session> {
        self.session.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<(), ConsoleError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| ConsoleError::Session("session lock poisoned".to_string()))?;
        *guard = Some(Session {
            stored_at: Some(Utc::now()),
            ..session.clone()
        });
        Ok(())
    }

    fn clear(&self) -> Result<(), ConsoleError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| ConsoleError::Session("session lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}
