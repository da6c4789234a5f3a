//! Identity source for sync operations.
//!
//! The web client keeps a `user` object in browser local storage; here
//! that becomes an injected capability so the sync engine never touches
//! storage directly and tests can swap in a fixed identity.

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use tracing::warn;

use shuar_core::model::UserId;

use crate::http::wire::IdValue;

/// Provides the identifier of the signed-in user, if any.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

//
// ─── STATIC IDENTITY ───────────────────────────────────────────────────────────
//

/// Fixed identity, mainly for tests and one-shot CLI runs.
#[derive(Debug, Clone)]
pub struct StaticIdentity(Option<UserId>);

impl StaticIdentity {
    #[must_use]
    pub fn user(id: &str) -> Self {
        Self(UserId::parse(id))
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.0.clone()
    }
}

//
// ─── STORED SESSION ────────────────────────────────────────────────────────────
//

/// Shape of the persisted session object. Only the identifier is
/// consumed; token and role pass through untouched.
#[derive(Debug, Deserialize)]
struct StoredSession {
    #[serde(default, alias = "id")]
    uid: Option<IdValue>,
    #[serde(default, alias = "accessToken", alias = "access_token")]
    _access_token: Option<String>,
    #[serde(default, alias = "rol")]
    _role: Option<String>,
}

/// Reads the session JSON file on every lookup, mirroring how the web
/// client re-reads local storage. A missing or malformed file simply
/// means nobody is signed in.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Builds a session store from `EDUSHUAR_SESSION_FILE`.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let path = env::var("EDUSHUAR_SESSION_FILE").ok()?;
        if path.trim().is_empty() {
            return None;
        }
        Some(Self::new(path))
    }
}

impl IdentityProvider for SessionFile {
    fn current_user(&self) -> Option<UserId> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let session: StoredSession = match serde_json::from_str(&contents) {
            Ok(session) => session,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unreadable session file");
                return None;
            }
        };
        session
            .uid
            .and_then(|id| UserId::parse(&id.into_string()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn session_file(contents: &str) -> (tempfile::TempDir, SessionFile) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, SessionFile::new(path))
    }

    #[test]
    fn static_identity_round_trips() {
        assert_eq!(
            StaticIdentity::user("u-9").current_user(),
            UserId::parse("u-9")
        );
        assert!(StaticIdentity::anonymous().current_user().is_none());
    }

    #[test]
    fn session_file_reads_uid() {
        let (_dir, store) = session_file(r#"{"uid":"u-1","accessToken":"t","role":"student"}"#);
        assert_eq!(store.current_user(), UserId::parse("u-1"));
    }

    #[test]
    fn session_file_accepts_id_alias_and_numeric_ids() {
        let (_dir, store) = session_file(r#"{"id":42,"rol":"admin"}"#);
        assert_eq!(store.current_user(), UserId::parse("42"));
    }

    #[test]
    fn missing_file_means_signed_out() {
        let store = SessionFile::new("/nonexistent/session.json");
        assert!(store.current_user().is_none());
    }

    #[test]
    fn malformed_file_means_signed_out() {
        let (_dir, store) = session_file("not-json");
        assert!(store.current_user().is_none());
    }

    #[test]
    fn empty_uid_means_signed_out() {
        let (_dir, store) = session_file(r#"{"uid":"  "}"#);
        assert!(store.current_user().is_none());
    }
}
