/// Wire types for the spreadsheet-script endpoint
///
/// Every operation shares one response envelope. Field names are
/// camelCase on the wire; unknown fields are ignored so the backend can
/// grow without breaking deployed clients.

use serde::{Deserialize, Serialize};

/// Envelope status discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// The four asset URLs of one participant's submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBundle {
    pub base: String,
    pub angle1: String,
    pub angle2: String,
    pub angle3: String,
}

/// Which image of a bundle is being referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Base,
    Angle1,
    Angle2,
    Angle3,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Base,
        AssetKind::Angle1,
        AssetKind::Angle2,
        AssetKind::Angle3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Base => crate::labels::BASE_REF,
            AssetKind::Angle1 => crate::labels::ANGLE_1,
            AssetKind::Angle2 => crate::labels::ANGLE_2,
            AssetKind::Angle3 => crate::labels::ANGLE_3,
        }
    }
}

impl AssetBundle {
    /// URL of one image of the bundle
    pub fn url(&self, kind: AssetKind) -> &str {
        match kind {
            AssetKind::Base => &self.base,
            AssetKind::Angle1 => &self.angle1,
            AssetKind::Angle2 => &self.angle2,
            AssetKind::Angle3 => &self.angle3,
        }
    }
}

/// Response envelope shared by every POST operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_day2_active: Option<bool>,
    #[serde(default)]
    pub assets: Option<AssetBundle>,
    #[serde(default)]
    pub author_nick: Option<String>,
}

/// Result of the GET existence check
///
/// Defaults to "unknown participant, stage 2 closed". The check prefers
/// degrading over failing, so a malformed response reads as not found.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCheck {
    pub exists: bool,
    pub is_day2_active: bool,
}

/// Day-1 submission body. No `action` field: the backend treats a bare
/// POST as a day-1 submit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkPayload {
    pub telegram_nick: String,
    /// Inline `data:<mime>;base64,` payloads
    pub base_reference: String,
    pub angle1: String,
    pub angle2: String,
    pub angle3: String,
}

/// Day-2 submission body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Day2Payload {
    pub action: &'static str,
    pub telegram_nick: String,
    pub received_reference: String,
    pub result1: String,
    pub result2: String,
}

impl Day2Payload {
    pub fn new(
        telegram_nick: String,
        received_reference: String,
        result1: String,
        result2: String,
    ) -> Self {
        Self {
            action: "submitDay2",
            telegram_nick,
            received_reference,
            result1,
            result2,
        }
    }
}

/// Body asking the backend for a random peer's bundle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomAssetRequest {
    pub action: &'static str,
    pub telegram_nick: String,
}

impl RandomAssetRequest {
    pub fn new(telegram_nick: String) -> Self {
        Self {
            action: "getRandomAsset",
            telegram_nick,
        }
    }
}

/// Body asking the backend to deliver a bundle into a chat
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub action: &'static str,
    pub telegram_nick: String,
    pub chat_id: i64,
}

impl RelayRequest {
    pub fn new(telegram_nick: String, chat_id: i64) -> Self {
        Self {
            action: "sendAssetsToChat",
            telegram_nick,
            chat_id,
        }
    }
}
