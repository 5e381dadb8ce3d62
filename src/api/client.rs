/// HTTP client for the spreadsheet-script endpoint
///
/// All five operations multiplex onto one base URL: the existence check
/// is a GET, everything else POSTs a JSON body whose `action` field picks
/// the server operation. Responses are read as text first and parsed
/// separately, so a script host that answers with an HTML error page
/// produces a readable decode error instead of a raw serde failure.

use chrono::Utc;
use thiserror::Error;

use super::types::{
    ApiResponse, Day2Payload, HomeworkPayload, RandomAssetRequest, RelayRequest, ResponseStatus,
    UserCheck,
};

/// How much of a non-JSON body to quote back in the error
const SNIPPET_LEN: usize = 150;

/// Known permission-failure fragments in backend relay errors, paired
/// with the guidance shown to the operator instead of the raw text.
const PERMISSION_HINTS: [(&str, &str); 3] = [
    (
        "bot was blocked",
        "The bot is blocked in this chat. Unblock it, press Start and try again.",
    ),
    (
        "chat not found",
        "The bot has never seen this chat. Open the bot in Telegram and press Start first.",
    ),
    (
        "not enough rights",
        "The bot lacks permission to post in this chat. Make it an admin or allow messages.",
    ),
];

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("server returned non-JSON response: {0}")]
    Decode(String),

    /// Declared `status: "error"` envelope from the backend
    #[error("{0}")]
    Server(String),
}

/// Client for one configured endpoint URL
#[derive(Debug, Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    base_url: String,
}

impl SheetClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Ask whether `nick` already has a submission and whether stage 2 is
    /// open. Any failure degrades to "not found / locked" so the form
    /// keeps working when the backend misbehaves.
    pub async fn check_user(&self, nick: &str) -> UserCheck {
        // Timestamp defeats intermediary caching of the GET
        let stamp = Utc::now().timestamp_millis().to_string();

        let response = match self
            .http
            .get(&self.base_url)
            .query(&[("nick", nick), ("t", stamp.as_str())])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                eprintln!("⚠️  User check failed: {}", e);
                return UserCheck::default();
            }
        };

        if !response.status().is_success() {
            eprintln!("⚠️  User check HTTP error: {}", response.status());
            return UserCheck::default();
        }

        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => {
                eprintln!("⚠️  User check body error: {}", e);
                return UserCheck::default();
            }
        };

        match serde_json::from_str::<UserCheck>(&text) {
            Ok(check) => check,
            Err(_) => {
                // The script host answers with an HTML page when the
                // deployment is broken. Degrade instead of surfacing.
                eprintln!("⚠️  User check returned non-JSON: {}", snippet(&text));
                UserCheck::default()
            }
        }
    }

    /// Submit the day-1 homework. The bare POST (no `action`) is the
    /// day-1 submit on the backend.
    pub async fn submit_day1(&self, payload: &HomeworkPayload) -> Result<ApiResponse, ApiError> {
        println!("📤 Submitting day-1 homework for {}", payload.telegram_nick);
        let response = self.http.post(&self.base_url).json(payload).send().await?;
        require_declared_success(parse_envelope(response).await?)
    }

    /// Submit the day-2 result shots
    pub async fn submit_day2(&self, payload: &Day2Payload) -> Result<ApiResponse, ApiError> {
        println!("📤 Submitting day-2 work for {}", payload.telegram_nick);
        let response = self.http.post(&self.base_url).json(payload).send().await?;
        require_declared_success(parse_envelope(response).await?)
    }

    /// Fetch a random peer's four-image bundle. Declared-error envelopes
    /// come back as `Ok`; the shell reads `status` and `message` itself.
    pub async fn fetch_random_asset(&self, nick: &str) -> Result<ApiResponse, ApiError> {
        println!("🎲 Requesting an exchange bundle for {}", nick);
        let body = RandomAssetRequest::new(nick.to_string());
        let response = self.http.post(&self.base_url).json(&body).send().await?;
        parse_envelope(response).await
    }

    /// Ask the backend to deliver the bundle into the given chat.
    /// Recognized permission failures are replaced with operator guidance.
    pub async fn send_assets_to_chat(
        &self,
        nick: &str,
        chat_id: i64,
    ) -> Result<ApiResponse, ApiError> {
        println!("📬 Relaying bundle for {} to chat {}", nick, chat_id);
        let body = RelayRequest::new(nick.to_string(), chat_id);
        let response = self.http.post(&self.base_url).json(&body).send().await?;

        match require_declared_success(parse_envelope(response).await?) {
            Ok(envelope) => Ok(envelope),
            Err(ApiError::Server(message)) => {
                let shown = relay_guidance(&message)
                    .map(str::to_string)
                    .unwrap_or(message);
                Err(ApiError::Server(shown))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch the raw bytes of an asset URL for an in-app preview
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Http(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Check HTTP status, then parse the body text as the shared envelope
async fn parse_envelope(response: reqwest::Response) -> Result<ApiResponse, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Http(status));
    }

    let text = response.text().await?;
    decode_envelope(&text)
}

/// Parse an envelope from body text, quoting a snippet on failure
fn decode_envelope(text: &str) -> Result<ApiResponse, ApiError> {
    serde_json::from_str::<ApiResponse>(text).map_err(|_| ApiError::Decode(snippet(text)))
}

/// Turn a declared `status: "error"` envelope into an `ApiError::Server`
fn require_declared_success(envelope: ApiResponse) -> Result<ApiResponse, ApiError> {
    match envelope.status {
        ResponseStatus::Success => Ok(envelope),
        ResponseStatus::Error => Err(ApiError::Server(
            envelope
                .message
                .unwrap_or_else(|| "Server reported an error".to_string()),
        )),
    }
}

/// Operator guidance for a recognized backend permission failure
pub fn relay_guidance(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    PERMISSION_HINTS
        .iter()
        .find(|(fragment, _)| lowered.contains(fragment))
        .map(|(_, hint)| *hint)
}

fn snippet(text: &str) -> String {
    let cut: String = text.chars().take(SNIPPET_LEN).collect();
    if text.chars().count() > SNIPPET_LEN {
        format!("{}...", cut)
    } else {
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_envelope_good_json() {
        let envelope = decode_envelope(r#"{"status": "success", "isDay2Active": false}"#).unwrap();
        assert_eq!(envelope.status, ResponseStatus::Success);
    }

    #[test]
    fn test_decode_envelope_html_body() {
        let html = format!("<!DOCTYPE html><html>{}</html>", "x".repeat(400));
        let err = decode_envelope(&html).unwrap_err();
        match err {
            ApiError::Decode(shown) => {
                assert!(shown.starts_with("<!DOCTYPE html>"));
                // Long bodies are cut down to a quotable snippet
                assert!(shown.len() <= SNIPPET_LEN + 3);
                assert!(shown.ends_with("..."));
            }
            other => panic!("expected Decode, got {:?}", other),
        }
    }

    #[test]
    fn test_declared_error_becomes_server_error() {
        let envelope =
            decode_envelope(r#"{"status": "error", "message": "quota exceeded"}"#).unwrap();
        match require_declared_success(envelope) {
            Err(ApiError::Server(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("expected Server error, got {:?}", other),
        }
    }

    #[test]
    fn test_declared_error_without_message_gets_fallback() {
        let envelope = decode_envelope(r#"{"status": "error"}"#).unwrap();
        match require_declared_success(envelope) {
            Err(ApiError::Server(message)) => assert_eq!(message, "Server reported an error"),
            other => panic!("expected Server error, got {:?}", other),
        }
    }

    #[test]
    fn test_relay_guidance_matches_known_fragments() {
        let hint = relay_guidance("Forbidden: bot was blocked by the user").unwrap();
        assert!(hint.contains("Unblock"));

        let hint = relay_guidance("Bad Request: Chat Not Found").unwrap();
        assert!(hint.contains("press Start"));

        assert!(relay_guidance("quota exceeded").is_none());
    }
}
