//! Issuance and verification of account tokens.
//!
//! Every verification runs the same pipeline: signature and issuer, expiry
//! against the injected clock, purpose, then subject. Only when all pass is
//! the account loaded, changed and saved. Token problems come back as
//! `false` (or [`TokenOutcome::Rejected`]); `Err` is reserved for repository
//! failures and password validation.

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::credential::CredentialManager;
use crate::error::AccountError;
use crate::identity::{UserId, UserIdentity};
use crate::repository::UserRepository;
use crate::token::{
    TokenClaims, TokenOutcome, TokenPurpose, TokenRejection, TokenSigner, UsedTokenRegistry,
};
use chrono::TimeDelta;
use tracing::{debug, error, info, warn};

/// Default token lifetime.
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Issues purpose-bound tokens and applies the account change they authorize.
pub struct TokenService<R, C = SystemClock> {
    signer: TokenSigner,
    credentials: CredentialManager,
    repository: R,
    clock: C,
    default_ttl: TimeDelta,
    replay_guard: Option<UsedTokenRegistry>,
}

impl<R: UserRepository, C: Clock> TokenService<R, C> {
    /// Service with the default lifetime and no replay guard.
    #[must_use]
    pub fn new(signer: TokenSigner, credentials: CredentialManager, repository: R, clock: C) -> Self {
        Self {
            signer,
            credentials,
            repository,
            clock,
            default_ttl: TimeDelta::seconds(DEFAULT_TTL_SECS),
            replay_guard: None,
        }
    }

    /// Build a service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the credential settings are invalid.
    pub fn from_config(config: &Config, repository: R, clock: C) -> Result<Self, AccountError> {
        let signer = TokenSigner::new(
            &config.signing_key,
            config.token.algorithm,
            config.token.issuer.clone(),
        );
        let credentials = CredentialManager::new(config.credential.clone())?;

        let service = Self::new(signer, credentials, repository, clock)
            .with_default_ttl(config.token.default_ttl);

        Ok(if config.token.single_use {
            service.with_replay_guard(UsedTokenRegistry::new())
        } else {
            service
        })
    }

    #[must_use]
    pub const fn with_default_ttl(mut self, ttl: TimeDelta) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Reject tokens that were already used once.
    #[must_use]
    pub fn with_replay_guard(mut self, registry: UsedTokenRegistry) -> Self {
        self.replay_guard = Some(registry);
        self
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    #[must_use]
    pub const fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    #[must_use]
    pub const fn default_ttl(&self) -> TimeDelta {
        self.default_ttl
    }

    /// # Errors
    ///
    /// Returns [`AccountError::TokenEncoding`] if signing fails.
    pub fn issue_confirmation_token(&self, user_id: UserId) -> Result<String, AccountError> {
        self.issue_confirmation_token_with_ttl(user_id, self.default_ttl)
    }

    /// # Errors
    ///
    /// Returns [`AccountError::TokenEncoding`] if signing fails.
    pub fn issue_confirmation_token_with_ttl(
        &self,
        user_id: UserId,
        ttl: TimeDelta,
    ) -> Result<String, AccountError> {
        self.issue(user_id, TokenPurpose::Confirm, None, ttl)
    }

    /// # Errors
    ///
    /// Returns [`AccountError::TokenEncoding`] if signing fails.
    pub fn issue_reset_token(&self, user_id: UserId) -> Result<String, AccountError> {
        self.issue_reset_token_with_ttl(user_id, self.default_ttl)
    }

    /// # Errors
    ///
    /// Returns [`AccountError::TokenEncoding`] if signing fails.
    pub fn issue_reset_token_with_ttl(
        &self,
        user_id: UserId,
        ttl: TimeDelta,
    ) -> Result<String, AccountError> {
        self.issue(user_id, TokenPurpose::Reset, None, ttl)
    }

    /// # Errors
    ///
    /// Returns a validation error if `new_email` is empty, or
    /// [`AccountError::TokenEncoding`] if signing fails.
    pub fn issue_email_change_token(
        &self,
        user_id: UserId,
        new_email: &str,
    ) -> Result<String, AccountError> {
        self.issue_email_change_token_with_ttl(user_id, new_email, self.default_ttl)
    }

    /// # Errors
    ///
    /// Returns a validation error if `new_email` is empty, or
    /// [`AccountError::TokenEncoding`] if signing fails.
    pub fn issue_email_change_token_with_ttl(
        &self,
        user_id: UserId,
        new_email: &str,
        ttl: TimeDelta,
    ) -> Result<String, AccountError> {
        self.issue(user_id, TokenPurpose::ChangeEmail, Some(new_email), ttl)
    }

    fn issue(
        &self,
        user_id: UserId,
        purpose: TokenPurpose,
        new_email: Option<&str>,
        ttl: TimeDelta,
    ) -> Result<String, AccountError> {
        if purpose.requires_new_email() && new_email.is_none_or(str::is_empty) {
            return Err(AccountError::validation("new email must not be empty"));
        }

        let mut claims = TokenClaims::new(
            self.signer.issuer(),
            user_id,
            purpose,
            self.clock.now(),
            ttl,
        );
        if let Some(email) = new_email {
            claims = claims.with_new_email(email);
        }

        let token = self.signer.sign(&claims)?;

        info!(
            user_id = %user_id,
            purpose = %purpose,
            ttl_secs = ttl.num_seconds(),
            "Issued account token"
        );

        Ok(token)
    }

    /// Check a token against the purpose and user the caller expects.
    ///
    /// # Errors
    ///
    /// Returns the first failed check: signature or format, expiry,
    /// purpose, then subject.
    pub fn verify_token(
        &self,
        token: &str,
        purpose: TokenPurpose,
        user_id: UserId,
    ) -> Result<TokenClaims, TokenRejection> {
        let claims = self.signer.verify(token)?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenRejection::Expired);
        }
        if claims.purpose != purpose {
            return Err(TokenRejection::PurposeMismatch);
        }
        if claims.subject() != Some(user_id) {
            return Err(TokenRejection::SubjectMismatch);
        }

        debug!(user_id = %user_id, purpose = %purpose, "Account token verified");
        Ok(claims)
    }

    /// Mark the account confirmed if `token` is a valid confirmation token for it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the repository fails.
    pub async fn confirm_user(&self, user_id: UserId, token: &str) -> Result<bool, AccountError> {
        Ok(self.confirm_user_outcome(user_id, token).await?.is_accepted())
    }

    /// Like [`TokenService::confirm_user`], keeping the rejection cause.
    ///
    /// # Errors
    ///
    /// Returns an error only if the repository fails.
    pub async fn confirm_user_outcome(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<TokenOutcome, AccountError> {
        let claims = match self.verify_token(token, TokenPurpose::Confirm, user_id) {
            Ok(claims) => claims,
            Err(reason) => return Ok(Self::reject(user_id, TokenPurpose::Confirm, reason)),
        };
        let Some(mut user) = self.repository.find_by_id(user_id).await? else {
            return Ok(Self::reject(user_id, TokenPurpose::Confirm, TokenRejection::UnknownUser));
        };

        user.confirm();
        self.commit(&claims, &user).await
    }

    /// Set a new password if `token` is a valid reset token for the account.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the token is valid but `new_password`
    /// violates the password policy, or an error if the repository fails.
    pub async fn reset_password(
        &self,
        user_id: UserId,
        token: &str,
        new_password: &str,
    ) -> Result<bool, AccountError> {
        Ok(self
            .reset_password_outcome(user_id, token, new_password)
            .await?
            .is_accepted())
    }

    /// Like [`TokenService::reset_password`], keeping the rejection cause.
    ///
    /// # Errors
    ///
    /// Same as [`TokenService::reset_password`].
    pub async fn reset_password_outcome(
        &self,
        user_id: UserId,
        token: &str,
        new_password: &str,
    ) -> Result<TokenOutcome, AccountError> {
        let claims = match self.verify_token(token, TokenPurpose::Reset, user_id) {
            Ok(claims) => claims,
            Err(reason) => return Ok(Self::reject(user_id, TokenPurpose::Reset, reason)),
        };
        let Some(mut user) = self.repository.find_by_id(user_id).await? else {
            return Ok(Self::reject(user_id, TokenPurpose::Reset, TokenRejection::UnknownUser));
        };

        user.set_password(&self.credentials, new_password)?;
        self.commit(&claims, &user).await
    }

    /// Move the account to the email address carried in `token`.
    ///
    /// Fails if the address already belongs to a different account.
    ///
    /// # Errors
    ///
    /// Returns an error only if the repository fails.
    pub async fn change_email(&self, user_id: UserId, token: &str) -> Result<bool, AccountError> {
        Ok(self.change_email_outcome(user_id, token).await?.is_accepted())
    }

    /// Like [`TokenService::change_email`], keeping the rejection cause.
    ///
    /// # Errors
    ///
    /// Returns an error only if the repository fails.
    pub async fn change_email_outcome(
        &self,
        user_id: UserId,
        token: &str,
    ) -> Result<TokenOutcome, AccountError> {
        let purpose = TokenPurpose::ChangeEmail;
        let claims = match self.verify_token(token, purpose, user_id) {
            Ok(claims) => claims,
            Err(reason) => return Ok(Self::reject(user_id, purpose, reason)),
        };
        let Some(new_email) = claims.new_email.clone().filter(|email| !email.is_empty()) else {
            return Ok(Self::reject(user_id, purpose, TokenRejection::MissingNewEmail));
        };

        if let Some(owner) = self.repository.find_by_email(&new_email).await? {
            if owner.id() != user_id {
                return Ok(Self::reject(user_id, purpose, TokenRejection::EmailTaken));
            }
        }
        let Some(mut user) = self.repository.find_by_id(user_id).await? else {
            return Ok(Self::reject(user_id, purpose, TokenRejection::UnknownUser));
        };

        user.set_email(new_email);
        self.commit(&claims, &user).await
    }

    /// Claim the token (when single use is enforced) and persist the change.
    async fn commit(
        &self,
        claims: &TokenClaims,
        user: &UserIdentity,
    ) -> Result<TokenOutcome, AccountError> {
        if let Some(guard) = &self.replay_guard {
            let now = self.clock.now().timestamp();
            if !guard.claim(&claims.jti, claims.exp, now).await {
                return Ok(Self::reject(user.id(), claims.purpose, TokenRejection::AlreadyUsed));
            }
        }

        match self.repository.save(user).await {
            Ok(()) => {
                info!(
                    user_id = %user.id(),
                    purpose = %claims.purpose,
                    "Applied account token"
                );
                Ok(TokenOutcome::Accepted)
            }
            Err(err) => {
                if let Some(guard) = &self.replay_guard {
                    guard.release(&claims.jti).await;
                }
                // Lost a race for the address between the lookup and the save.
                if err.is_conflict() && claims.purpose == TokenPurpose::ChangeEmail {
                    return Ok(Self::reject(user.id(), claims.purpose, TokenRejection::EmailTaken));
                }
                error!(
                    user_id = %user.id(),
                    purpose = %claims.purpose,
                    error = %err,
                    "Failed to persist account change"
                );
                Err(err.into())
            }
        }
    }

    fn reject(user_id: UserId, purpose: TokenPurpose, reason: TokenRejection) -> TokenOutcome {
        warn!(
            user_id = %user_id,
            purpose = %purpose,
            reason = reason.as_str(),
            "Account token rejected"
        );
        TokenOutcome::Rejected(reason)
    }
}
