//! Shared setup for account token integration tests.

#![allow(dead_code)]

use account_token::token::TokenSigner;
use account_token::{
    CredentialConfig, CredentialManager, ManualClock, MemoryUserRepository, SigningKey,
    TokenAlgorithm, TokenService, UserId, UserIdentity, UserRepository,
};
use test_utils::SampleAccount;

/// Fixed start time for every scenario.
pub const T0: i64 = 1_700_000_000;

pub type TestService<R = MemoryUserRepository> = TokenService<R, ManualClock>;

/// Argon2 parameters cheap enough for property tests.
pub fn credentials() -> CredentialManager {
    CredentialManager::new(CredentialConfig::default().with_cost(8, 1, 1)).unwrap()
}

pub fn signer() -> TokenSigner {
    let key = SigningKey::new(b"integration-signing-key-0123456789abcdef".to_vec()).unwrap();
    TokenSigner::new(&key, TokenAlgorithm::HS512, "account-token")
}

pub fn service_with<R: UserRepository>(repository: R) -> (TestService<R>, ManualClock) {
    let clock = ManualClock::at_timestamp(T0);
    let service = TokenService::new(signer(), credentials(), repository, clock.clone());
    (service, clock)
}

pub fn service() -> (TestService, ManualClock) {
    service_with(MemoryUserRepository::new())
}

pub fn identity(account: &SampleAccount, credentials: &CredentialManager) -> UserIdentity {
    UserIdentity::with_password(
        UserId::new(account.id),
        account.username,
        account.email,
        credentials,
        account.password,
    )
    .unwrap()
}

/// Store the sample accounts in the service's repository.
pub async fn seed<R: UserRepository>(service: &TestService<R>, accounts: &[SampleAccount]) {
    for account in accounts {
        let user = identity(account, service.credentials());
        service.repository().save(&user).await.unwrap();
    }
}

pub async fn load<R: UserRepository>(service: &TestService<R>, id: i64) -> UserIdentity {
    service
        .repository()
        .find_by_id(UserId::new(id))
        .await
        .unwrap()
        .unwrap()
}

pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}
