use serde::{Deserialize, Serialize};
use std::fmt;

/// What a token authorizes. Verification only accepts the purpose it expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Confirm the account's email address
    Confirm,
    /// Set a new password
    Reset,
    /// Move the account to the email address carried in the token
    ChangeEmail,
}

impl TokenPurpose {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Reset => "reset",
            Self::ChangeEmail => "change_email",
        }
    }

    /// Whether tokens of this purpose must carry a new email address.
    #[must_use]
    pub const fn requires_new_email(&self) -> bool {
        matches!(self, Self::ChangeEmail)
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&TokenPurpose::Confirm).unwrap(), "\"confirm\"");
        assert_eq!(serde_json::to_string(&TokenPurpose::Reset).unwrap(), "\"reset\"");
        assert_eq!(
            serde_json::to_string(&TokenPurpose::ChangeEmail).unwrap(),
            "\"change_email\""
        );
    }

    #[test]
    fn test_display_matches_wire_name() {
        for purpose in [TokenPurpose::Confirm, TokenPurpose::Reset, TokenPurpose::ChangeEmail] {
            let wire = serde_json::to_string(&purpose).unwrap();
            assert_eq!(wire.trim_matches('"'), purpose.to_string());
        }
    }

    #[test]
    fn test_only_change_email_carries_address() {
        assert!(TokenPurpose::ChangeEmail.requires_new_email());
        assert!(!TokenPurpose::Confirm.requires_new_email());
        assert!(!TokenPurpose::Reset.requires_new_email());
    }

    #[test]
    fn test_unknown_purpose_rejected() {
        assert!(serde_json::from_str::<TokenPurpose>("\"login\"").is_err());
    }
}
