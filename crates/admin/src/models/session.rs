//! Session-stored types for the back-office.

use serde::{Deserialize, Serialize};

use voidwear_core::{Email, UserId};

/// The logged-in operator, as stored in the session.
///
/// Role is checked at login time; only admins get a session at all, so no
/// role field is stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: UserId,
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

/// Session keys.
pub mod keys {
    /// Key for the logged-in operator.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the commerce API bearer token.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for one-shot flash messages.
    pub const FLASH: &str = "flash";
}
