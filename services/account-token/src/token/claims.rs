use crate::identity::UserId;
use crate::token::TokenPurpose;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Signed payload of an account token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    /// Bound user id, as a string per JWT convention
    pub sub: String,
    pub purpose: TokenPurpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl TokenClaims {
    /// Build claims issued at `issued_at` that expire `ttl` later.
    ///
    /// A negative `ttl` produces claims that are already expired.
    #[must_use]
    pub fn new(
        issuer: impl Into<String>,
        subject: UserId,
        purpose: TokenPurpose,
        issued_at: DateTime<Utc>,
        ttl: TimeDelta,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            iss: issuer.into(),
            sub: subject.to_string(),
            purpose,
            new_email: None,
            iat,
            exp: iat.saturating_add(ttl.num_seconds()),
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    #[must_use]
    pub fn with_new_email(mut self, new_email: impl Into<String>) -> Self {
        self.new_email = Some(new_email.into());
        self
    }

    /// The bound user id, if `sub` parses as one.
    #[must_use]
    pub fn subject(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }

    /// Tokens stay valid through their expiry second.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_claims_creation() {
        let claims = TokenClaims::new(
            "account-token",
            UserId::new(7),
            TokenPurpose::Confirm,
            at(1_000),
            TimeDelta::seconds(3600),
        );

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.subject(), Some(UserId::new(7)));
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 4_600);
        assert!(claims.new_email.is_none());
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = TokenClaims::new(
            "account-token",
            UserId::new(7),
            TokenPurpose::Confirm,
            at(1_000),
            TimeDelta::seconds(3600),
        );

        assert!(!claims.is_expired_at(at(4_599)));
        assert!(!claims.is_expired_at(at(4_600)));
        assert!(claims.is_expired_at(at(4_601)));
    }

    #[test]
    fn test_negative_ttl_is_expired_immediately() {
        let claims = TokenClaims::new(
            "account-token",
            UserId::new(1),
            TokenPurpose::Reset,
            at(1_000),
            TimeDelta::seconds(-1),
        );
        assert!(claims.is_expired_at(at(1_000)));
    }

    #[test]
    fn test_new_email_only_serialized_when_present() {
        let base = TokenClaims::new(
            "account-token",
            UserId::new(1),
            TokenPurpose::Confirm,
            at(0),
            TimeDelta::seconds(60),
        );
        let json = serde_json::to_value(&base).unwrap();
        assert!(json.get("new_email").is_none());

        let change = base.with_new_email("new@example.com");
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["new_email"], "new@example.com");
    }

    #[test]
    fn test_unique_jti() {
        let a = TokenClaims::new("i", UserId::new(1), TokenPurpose::Reset, at(0), TimeDelta::seconds(1));
        let b = TokenClaims::new("i", UserId::new(1), TokenPurpose::Reset, at(0), TimeDelta::seconds(1));
        assert_ne!(a.jti, b.jti);
    }
}
