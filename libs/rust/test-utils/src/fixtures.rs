//! Sample accounts for tests.

/// A sample account with its plaintext password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleAccount {
    /// User id
    pub id: i64,
    /// Username
    pub username: &'static str,
    /// Email address
    pub email: &'static str,
    /// Plaintext password
    pub password: &'static str,
}

impl SampleAccount {
    /// An unconfirmed account with id 7.
    #[must_use]
    pub const fn alice() -> Self {
        Self {
            id: 7,
            username: "alice",
            email: "alice@example.com",
            password: "correct horse battery staple",
        }
    }

    /// A second account with id 42.
    #[must_use]
    pub const fn bob() -> Self {
        Self {
            id: 42,
            username: "bob",
            email: "bob@example.com",
            password: "hunter2",
        }
    }

    /// A third account, used when a test needs an address owner other than the subject.
    #[must_use]
    pub const fn carol() -> Self {
        Self {
            id: 99,
            username: "carol",
            email: "carol@example.org",
            password: "Tr0ub4dor&3",
        }
    }

    /// All sample accounts.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::alice(), Self::bob(), Self::carol()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_unique() {
        let all = SampleAccount::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.email, b.email);
                assert_ne!(a.username, b.username);
            }
        }
    }
}
