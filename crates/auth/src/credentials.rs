//! Username/password verification.

/// Capability to check a username/password pair.
///
/// The API layer only sees this trait, so a real identity provider can replace
/// the demo table without touching any handler.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Fixed allow-list of demo accounts.
const DEMO_ACCOUNTS: &[(&str, &str)] = &[("admin", "admin"), ("teste", "123456")];

/// Demo stand-in for an identity provider: two hardcoded accounts, no hashing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoCredentials;

impl DemoCredentials {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialVerifier for DemoCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        DEMO_ACCOUNTS
            .iter()
            .any(|(u, p)| *u == username && *p == password)
    }
}
