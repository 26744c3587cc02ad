//! Application services shared by all handlers.

use std::sync::Arc;

use clientes_auth::{CredentialVerifier, DemoCredentials, Hs256TokenIssuer, JwtSettings};
use clientes_customers::{CustomerStore, InMemoryCustomerStore};

/// Process-wide state injected into handlers (no ambient globals).
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<dyn CustomerStore>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub tokens: Hs256TokenIssuer,
}

impl AppServices {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        credentials: Arc<dyn CredentialVerifier>,
        tokens: Hs256TokenIssuer,
    ) -> Self {
        Self {
            customers,
            credentials,
            tokens,
        }
    }
}

/// Default wiring: seeded in-memory store + demo accounts.
pub fn build_services(jwt: &JwtSettings) -> AppServices {
    AppServices::new(
        Arc::new(InMemoryCustomerStore::with_seed_data()),
        Arc::new(DemoCredentials::new()),
        Hs256TokenIssuer::new(jwt),
    )
}
