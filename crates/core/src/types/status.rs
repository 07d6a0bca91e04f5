//! Status enums for orders and users.

use serde::{Deserialize, Serialize};

/// Payment status of an order.
///
/// Driven by external payment-provider callbacks; the commerce API stores the
/// lowercase string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment confirmed by the provider.
    Approved,
    /// Awaiting provider confirmation (e.g. offline payment methods).
    #[default]
    Pending,
    /// Provider rejected the payment.
    Rejected,
    /// Buyer or provider cancelled before completion.
    Cancelled,
}

impl PaymentStatus {
    /// Whether the status can still change via a later callback.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Cancelled)
    }

    /// Human-readable label for table rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Pending => "Pending",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Role of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Back-office access.
    Admin,
    /// Regular shopper.
    #[default]
    Client,
}

impl UserRole {
    /// Whether the role grants back-office access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Human-readable label for table rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Client => "Client",
        }
    }
}

impl core::fmt::Display for UserRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_serde_lowercase() {
        let json = serde_json::to_string(&PaymentStatus::Approved).expect("serialize");
        assert_eq!(json, "\"approved\"");
        let back: PaymentStatus = serde_json::from_str("\"cancelled\"").expect("deserialize");
        assert_eq!(back, PaymentStatus::Cancelled);
    }

    #[test]
    fn test_pending_is_not_final() {
        assert!(!PaymentStatus::Pending.is_final());
        assert!(PaymentStatus::Approved.is_final());
        assert!(PaymentStatus::Rejected.is_final());
    }

    #[test]
    fn test_role_serde_lowercase() {
        let back: UserRole = serde_json::from_str("\"admin\"").expect("deserialize");
        assert_eq!(back, UserRole::Admin);
        assert_eq!(UserRole::default(), UserRole::Client);
    }
}
