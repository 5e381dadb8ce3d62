/// Endpoint configuration
///
/// The whole app talks to a single spreadsheet-script URL. It comes from
/// the `HOMEWORK_SCRIPT_URL` environment variable or, failing that, from
/// a small JSON file in the user's config directory. Without a usable URL
/// the shell blocks on the setup screen.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder left in freshly copied configs. Treated as "not set".
const URL_PLACEHOLDER: &str = "YOUR_WEB_APP_URL_HERE";

/// Environment variable that overrides the config file
pub const URL_ENV_VAR: &str = "HOMEWORK_SCRIPT_URL";

/// Persisted configuration file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub script_url: String,
}

/// Path of the on-disk config file
///
/// - Linux: ~/.config/homework-exchange/config.json
/// - macOS: ~/Library/Application Support/homework-exchange/config.json
/// - Windows: %APPDATA%\homework-exchange\config.json
pub fn config_path() -> PathBuf {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .expect("Could not determine user config directory");
    path.push("homework-exchange");
    path.push("config.json");
    path
}

/// Load the endpoint URL from the environment or the config file.
/// Returns `None` when no usable URL is configured.
pub fn load() -> Option<ScriptConfig> {
    if let Ok(raw) = std::env::var(URL_ENV_VAR) {
        if let Some(url) = clean_url(&raw) {
            println!("🔧 Endpoint from {}: {}", URL_ENV_VAR, url);
            return Some(ScriptConfig { script_url: url });
        }
    }

    load_from_file(&config_path())
}

/// Read and validate the config file at `path`
pub fn load_from_file(path: &std::path::Path) -> Option<ScriptConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    let parsed: ScriptConfig = match serde_json::from_str(&contents) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("⚠️  Could not parse {}: {}", path.display(), e);
            return None;
        }
    };

    let url = clean_url(&parsed.script_url)?;
    println!("🔧 Endpoint from {}: {}", path.display(), url);
    Some(ScriptConfig { script_url: url })
}

/// Strip copy-paste artifacts (whitespace, stray quotes) and reject
/// unusable values. A URL that does not end in `/exec` is accepted but
/// flagged, since the script host serves responses only on that suffix.
pub fn clean_url(raw: &str) -> Option<String> {
    let url: String = raw.trim().chars().filter(|c| *c != '\'' && *c != '"').collect();

    if url.is_empty() || url == URL_PLACEHOLDER {
        return None;
    }

    if !url.ends_with("/exec") {
        eprintln!("⚠️  Script URL does not end with /exec: {}", url);
    }

    Some(url)
}
