//! Session-related types.
//!
//! Types stored in the session for authentication and cart identity state.

use serde::{Deserialize, Serialize};

use voidwear_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name shown in the header.
    pub first_name: String,
}

/// One-shot flash message shown on the next page render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Notice,
    Error,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Notice,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// CSS class for the flash banner.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "flash-success",
            FlashKind::Notice => "flash-notice",
            FlashKind::Error => "flash-error",
        }
    }
}

/// Session keys for authentication and cart identity data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the commerce API bearer token.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for the anonymous guest cart session id.
    pub const GUEST_SESSION_ID: &str = "guest_session_id";

    /// Key for the upstream chat session id. No chat UI is served here, but
    /// the id survives reloads like the other identity state and logout's
    /// flush clears it with everything else.
    pub const CHAT_SESSION_ID: &str = "chat_session_id";

    /// Key for one-shot flash messages.
    pub const FLASH: &str = "flash";
}
