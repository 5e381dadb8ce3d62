/// Persisted session
///
/// One key, one value: the participant's Telegram nick, stored as a tiny
/// JSON file in the user's data directory. Presence of a saved nick only
/// pre-fills state; the shell always re-verifies it against the backend
/// before trusting it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    telegram_nick: String,
}

/// Reads and writes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the default platform location:
    /// - Linux: ~/.local/share/homework-exchange/session.json
    /// - macOS: ~/Library/Application Support/homework-exchange/session.json
    /// - Windows: %APPDATA%\homework-exchange\session.json
    pub fn new() -> Self {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");
        path.push("homework-exchange");
        path.push("session.json");
        Self { path }
    }

    /// Store at an explicit path
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// The saved nick, if any. Corrupt or empty files read as no session.
    pub fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let parsed: SessionFile = serde_json::from_str(&contents).ok()?;

        let nick = parsed.telegram_nick.trim().to_string();
        if nick.is_empty() {
            return None;
        }

        println!("🔑 Restored session nick: {}", nick);
        Some(nick)
    }

    /// Persist the nick. Called on successful submit and on skip.
    pub fn save(&self, nick: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = SessionFile {
            telegram_nick: nick.trim().to_string(),
        };
        let json = serde_json::to_string(&file).expect("session file serializes");
        std::fs::write(&self.path, json)?;

        println!("🔑 Saved session nick: {}", nick.trim());
        Ok(())
    }

    /// Forget the saved nick (logout)
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => println!("🔑 Session cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => eprintln!("⚠️  Could not clear session: {}", e),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("nested").join("session.json"));

        assert!(store.load().is_none());

        store.save("@alice").unwrap();
        assert_eq!(store.load().as_deref(), Some("@alice"));

        store.clear();
        assert!(store.load().is_none());

        // Clearing twice is fine
        store.clear();
    }

    #[test]
    fn test_whitespace_nick_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at(dir.path().join("session.json"));

        store.save("  @bob  ").unwrap();
        assert_eq!(store.load().as_deref(), Some("@bob"));
    }

    #[test]
    fn test_corrupt_file_reads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{broken").unwrap();

        let store = SessionStore::at(path.clone());
        assert!(store.load().is_none());

        std::fs::write(&path, r#"{"telegram_nick": "   "}"#).unwrap();
        assert!(store.load().is_none());
    }
}
