use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Why a token was not accepted.
///
/// Callers of the boolean API only ever see `false`; the cause is kept for
/// logs and tests.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token issuer is not accepted")]
    InvalidIssuer,

    #[error("token has expired")]
    Expired,

    #[error("token was issued for a different purpose")]
    PurposeMismatch,

    #[error("token was issued for a different user")]
    SubjectMismatch,

    #[error("token carries no new email address")]
    MissingNewEmail,

    #[error("email address belongs to another user")]
    EmailTaken,

    #[error("user does not exist")]
    UnknownUser,

    #[error("token has already been used")]
    AlreadyUsed,
}

impl TokenRejection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "TOKEN_MALFORMED",
            Self::InvalidSignature => "TOKEN_INVALID_SIGNATURE",
            Self::InvalidIssuer => "TOKEN_INVALID_ISSUER",
            Self::Expired => "TOKEN_EXPIRED",
            Self::PurposeMismatch => "TOKEN_PURPOSE_MISMATCH",
            Self::SubjectMismatch => "TOKEN_SUBJECT_MISMATCH",
            Self::MissingNewEmail => "TOKEN_MISSING_NEW_EMAIL",
            Self::EmailTaken => "TOKEN_EMAIL_TAKEN",
            Self::UnknownUser => "TOKEN_UNKNOWN_USER",
            Self::AlreadyUsed => "TOKEN_ALREADY_USED",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenRejection {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::InvalidSignature,
            ErrorKind::InvalidIssuer => Self::InvalidIssuer,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}

/// Result of a token-driven account change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOutcome {
    /// The token verified and the change was persisted
    Accepted,
    /// Nothing was changed
    Rejected(TokenRejection),
}

impl TokenOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<TokenRejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

impl From<TokenRejection> for TokenOutcome {
    fn from(reason: TokenRejection) -> Self {
        Self::Rejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        assert!(TokenOutcome::Accepted.is_accepted());
        assert_eq!(TokenOutcome::Accepted.rejection(), None);

        let rejected = TokenOutcome::from(TokenRejection::Expired);
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.rejection(), Some(TokenRejection::Expired));
    }

    #[test]
    fn test_jwt_error_mapping() {
        let err: jsonwebtoken::errors::Error = ErrorKind::InvalidSignature.into();
        assert_eq!(TokenRejection::from(err), TokenRejection::InvalidSignature);

        let err: jsonwebtoken::errors::Error = ErrorKind::InvalidIssuer.into();
        assert_eq!(TokenRejection::from(err), TokenRejection::InvalidIssuer);

        let err: jsonwebtoken::errors::Error = ErrorKind::InvalidToken.into();
        assert_eq!(TokenRejection::from(err), TokenRejection::Malformed);
    }

    #[test]
    fn test_codes_are_distinct() {
        let all = [
            TokenRejection::Malformed,
            TokenRejection::InvalidSignature,
            TokenRejection::InvalidIssuer,
            TokenRejection::Expired,
            TokenRejection::PurposeMismatch,
            TokenRejection::SubjectMismatch,
            TokenRejection::MissingNewEmail,
            TokenRejection::EmailTaken,
            TokenRejection::UnknownUser,
            TokenRejection::AlreadyUsed,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}
