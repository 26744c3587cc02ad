use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims carried by access tokens.
///
/// Timestamps are seconds since the Unix epoch, as they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the authenticated username.
    pub sub: String,

    /// Unique token identifier (one per issuance).
    pub jti: String,

    /// Display name; same value as `sub` for the demo accounts.
    pub unique_name: String,

    pub iss: String,

    pub aud: String,

    /// Issued-at.
    pub iat: i64,

    /// Not-before; equal to `iat` for tokens minted here.
    pub nbf: i64,

    /// Expiration.
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (not_before is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= nbf)")]
    InvalidTimeWindow,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token issuer does not match")]
    InvalidIssuer,

    #[error("token audience does not match")]
    InvalidAudience,

    #[error("token is missing required claim `{0}`")]
    MissingClaim(String),

    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Deterministically validate the time window of JWT claims.
///
/// A token is accepted while `nbf - skew <= now <= exp + skew`.
///
/// Note: this validates the *claims* only. Signature, issuer and audience
/// checks happen while decoding (see [`crate::token::Hs256JwtValidator`]).
pub fn validate_claims(
    claims: &JwtClaims,
    now: DateTime<Utc>,
    skew: Duration,
) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.nbf {
        return Err(TokenValidationError::InvalidTimeWindow);
    }

    let now = now.timestamp();
    let skew = skew.num_seconds();
    if now < claims.nbf.saturating_sub(skew) {
        return Err(TokenValidationError::NotYetValid);
    }
    if now > claims.exp.saturating_add(skew) {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
