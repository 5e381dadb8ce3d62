/// Optional embedding-host bridge
///
/// When the app is launched by a chat host it receives the chat user's
/// numeric id through the environment. Everything here degrades
/// gracefully: without the bridge the relay feature stays hidden and
/// links still open in the system browser.

/// Environment variable carrying the host chat id
pub const CHAT_ID_ENV: &str = "TG_CHAT_ID";

/// Connection to the embedding host
#[derive(Debug, Clone, Copy)]
pub struct HostBridge {
    /// Numeric id of the chat the app was opened from
    pub chat_id: i64,
}

/// Detect the host from the environment. `None` means standalone.
pub fn detect() -> Option<HostBridge> {
    let raw = std::env::var(CHAT_ID_ENV).ok()?;
    match raw.trim().parse::<i64>() {
        Ok(chat_id) => Some(HostBridge { chat_id }),
        Err(_) => {
            eprintln!("⚠️  Ignoring non-numeric {}: {}", CHAT_ID_ENV, raw);
            None
        }
    }
}

impl HostBridge {
    /// Signal the host that the app finished booting
    pub fn ready(&self) {
        println!("🤝 Host bridge ready (chat {})", self.chat_id);
    }
}

/// Open a link in the system browser. Failures are logged, not fatal:
/// the user can still reach the asset through the relay feature.
pub fn open_link(url: &str) {
    println!("🌐 Opening {}", url);
    if let Err(e) = open::that(url) {
        eprintln!("⚠️  Could not open link: {}", e);
    }
}

/// Rewrite a drive viewing link into its direct-download form
pub fn to_download_url(url: &str) -> String {
    url.replace("export=view", "export=download")
}
