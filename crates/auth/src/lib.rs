//! `clientes-auth` — credential checks and bearer-token issuance/verification.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod credentials;
pub mod token;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use credentials::{CredentialVerifier, DemoCredentials};
pub use token::{Hs256JwtValidator, Hs256TokenIssuer, IssuedToken, JwtSettings, JwtValidator, TokenError};
