//! Shared proptest generators for account inputs.

use proptest::prelude::*;

/// Generate non-empty plaintext passwords, including non-ASCII ones.
pub fn password_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9!@#$%^&*()_+=-]{1,32}",
        "\\PC{1,16}",
    ]
}

/// Generate two passwords that are guaranteed to differ.
pub fn distinct_passwords_strategy() -> impl Strategy<Value = (String, String)> {
    (password_strategy(), password_strategy()).prop_filter("passwords must differ", |(a, b)| a != b)
}

/// Generate email addresses.
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z0-9._%+-]{1,20}", "[a-z0-9-]{1,15}", "[a-z]{2,4}")
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// Generate usernames.
pub fn username_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{2,31}".prop_map(|s| s)
}

/// Generate positive user ids.
pub fn user_id_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000i64
}

/// Generate two distinct user ids.
pub fn distinct_user_ids_strategy() -> impl Strategy<Value = (i64, i64)> {
    (user_id_strategy(), user_id_strategy()).prop_filter("ids must differ", |(a, b)| a != b)
}

/// Generate token lifetimes in seconds, from one minute to one day.
pub fn ttl_strategy() -> impl Strategy<Value = i64> {
    60i64..86_400i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn test_email_strategy_shape() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            let email = email_strategy()
                .new_tree(&mut runner)
                .map(|tree| tree.current())
                .unwrap_or_default();
            assert!(email.contains('@'));
            assert!(email.rsplit('.').next().is_some_and(|tld| tld.len() >= 2));
        }
    }

    #[test]
    fn test_password_strategy_non_empty() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            let password = password_strategy()
                .new_tree(&mut runner)
                .map(|tree| tree.current())
                .unwrap_or_default();
            assert!(!password.is_empty());
        }
    }
}
