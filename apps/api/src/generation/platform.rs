//! Target platforms for generated content.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A platform id as sent by the client (`"linkedin"`, `"youtube"`, ...).
/// Unknown ids are kept verbatim so new platforms work without a release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    LinkedIn,
    Instagram,
    Facebook,
    Pinterest,
    WhatsApp,
    Email,
    Quadrant,
    YouTube,
    MiniBlog,
    Other(String),
}

impl Platform {
    pub fn id(&self) -> &str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Pinterest => "pinterest",
            Platform::WhatsApp => "whatsapp",
            Platform::Email => "email",
            Platform::Quadrant => "quadrant",
            Platform::YouTube => "youtube",
            Platform::MiniBlog => "miniblog",
            Platform::Other(id) => id,
        }
    }

    /// Human-facing name used inside prompts.
    pub fn display_name(&self) -> &str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Pinterest => "Pinterest",
            Platform::WhatsApp => "WhatsApp",
            Platform::Email => "Email",
            Platform::Quadrant => "Quadrant",
            Platform::YouTube => "YouTube",
            Platform::MiniBlog => "Mini Blog",
            Platform::Other(id) => id,
        }
    }

    /// Pre-filled share link for `content`, or `None` where the platform has no
    /// share intent (Instagram, YouTube and the rest).
    pub fn share_url(&self, content: &str) -> Option<String> {
        let base = match self {
            Platform::WhatsApp => "https://wa.me/?text=",
            Platform::Facebook => "https://www.facebook.com/sharer/sharer.php?quote=",
            Platform::LinkedIn => "https://www.linkedin.com/sharing/share-offsite/?mini=true&summary=",
            Platform::Pinterest => "https://pinterest.com/pin/create/button/?description=",
            Platform::Email => "mailto:?subject=Generated%20Content&body=",
            _ => return None,
        };
        Some(format!("{base}{}", urlencoding::encode(content)))
    }
}

impl From<String> for Platform {
    fn from(id: String) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Platform::LinkedIn,
            "instagram" => Platform::Instagram,
            "facebook" => Platform::Facebook,
            "pinterest" => Platform::Pinterest,
            "whatsapp" => Platform::WhatsApp,
            "email" => Platform::Email,
            "quadrant" => Platform::Quadrant,
            "youtube" => Platform::YouTube,
            "miniblog" => Platform::MiniBlog,
            _ => Platform::Other(id.trim().to_string()),
        }
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.id().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
