//! HS256 access-token minting and verification.
//!
//! Both sides share one [`JwtSettings`]: the symmetric secret, the expected
//! issuer/audience pair, the token lifetime and the clock-skew tolerance.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

/// Default lifetime of an access token.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Default tolerance applied around `nbf`/`exp` during verification.
pub const DEFAULT_CLOCK_SKEW: Duration = Duration::from_secs(30);

/// Token signing/verification parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSettings {
    pub issuer: String,
    pub audience: String,
    /// Symmetric HMAC secret (UTF-8 bytes of the configured key).
    pub secret: Vec<u8>,
    pub token_ttl: Duration,
    pub clock_skew: Duration,
}

impl JwtSettings {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            secret: secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
            clock_skew: DEFAULT_CLOCK_SKEW,
        }
    }

    /// Check that the lifetime and skew are representable as signed chrono
    /// durations and that a token minted at `now` gets a representable `exp`.
    pub fn check_ranges(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        expiry_after(self.token_ttl, now)?;
        skew_duration(self.clock_skew)?;
        Ok(())
    }
}

fn expiry_after(ttl: Duration, now: DateTime<Utc>) -> Result<DateTime<Utc>, TokenError> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(TokenError::InvalidTtl(ttl))
}

fn skew_duration(skew: Duration) -> Result<chrono::Duration, TokenError> {
    chrono::Duration::from_std(skew).map_err(|_| TokenError::InvalidSkew(skew))
}

impl core::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("clock_skew", &self.clock_skew)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token lifetime out of range: {0:?}")]
    InvalidTtl(Duration),

    #[error("clock skew out of range: {0:?}")]
    InvalidSkew(Duration),

    #[error("failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// A freshly minted access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact serialized JWT.
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
    pub claims: JwtClaims,
}

/// Mints HS256-signed access tokens.
#[derive(Clone)]
pub struct Hs256TokenIssuer {
    issuer: String,
    audience: String,
    ttl: Duration,
    encoding_key: EncodingKey,
}

impl Hs256TokenIssuer {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            ttl: settings.token_ttl,
            encoding_key: EncodingKey::from_secret(&settings.secret),
        }
    }

    /// Issue a token for `username` with the configured lifetime.
    pub fn issue(&self, username: &str, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        self.issue_with_ttl(username, self.ttl, now)
    }

    pub fn issue_with_ttl(
        &self,
        username: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires = expiry_after(ttl, now)?;

        let claims = JwtClaims {
            sub: username.to_string(),
            jti: Uuid::now_v7().to_string(),
            unique_name: username.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires.timestamp(),
        };

        let access_token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            access_token,
            expires_in: ttl.as_secs(),
            claims,
        })
    }
}

/// Verifies bearer tokens presented on protected requests.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// HS256 validator: signature, issuer and audience are checked while decoding,
/// the time window afterwards against the caller-supplied clock.
#[derive(Clone)]
pub struct Hs256JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    clock_skew: chrono::Duration,
}

impl Hs256JwtValidator {
    pub fn new(settings: &JwtSettings) -> Result<Self, TokenError> {
        let clock_skew = skew_duration(settings.clock_skew)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        // Time checks run in `validate_claims` so `now` stays injectable.
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(&settings.secret),
            validation,
            clock_skew,
        })
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?;
        validate_claims(&data.claims, now, self.clock_skew)?;
        Ok(data.claims)
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenValidationError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenValidationError::InvalidSignature,
        ErrorKind::InvalidIssuer => TokenValidationError::InvalidIssuer,
        ErrorKind::InvalidAudience => TokenValidationError::InvalidAudience,
        ErrorKind::MissingRequiredClaim(claim) => TokenValidationError::MissingClaim(claim.clone()),
        ErrorKind::ExpiredSignature => TokenValidationError::Expired,
        ErrorKind::ImmatureSignature => TokenValidationError::NotYetValid,
        _ => TokenValidationError::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a-test-secret-that-is-long-enough-for-hs256";

    fn settings() -> JwtSettings {
        JwtSettings::new("RestClientesJwt", "RestClientesJwtClients", SECRET)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn issued_token_verifies_with_same_subject() {
        let settings = settings();
        let now = Utc::now();
        let issued = Hs256TokenIssuer::new(&settings).issue("admin", now).unwrap();

        assert_eq!(issued.expires_in, 3600);
        assert_eq!(issued.claims.exp - issued.claims.iat, 3600);

        let claims = Hs256JwtValidator::new(&settings)
            .unwrap()
            .validate(&issued.access_token, now)
            .unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.unique_name, "admin");
        assert_eq!(claims.iss, "RestClientesJwt");
        assert_eq!(claims.aud, "RestClientesJwtClients");
    }

    #[test]
    fn every_issuance_gets_a_fresh_token_id() {
        let issuer = Hs256TokenIssuer::new(&settings());
        let now = Utc::now();
        let a = issuer.issue("teste", now).unwrap();
        let b = issuer.issue("teste", now).unwrap();
        assert_ne!(a.claims.jti, b.claims.jti);
    }

    #[test]
    fn rejected_once_expiry_plus_skew_has_passed() {
        let settings = settings();
        let issued = Hs256TokenIssuer::new(&settings)
            .issue_with_ttl("admin", Duration::from_secs(60), at(10_000))
            .unwrap();
        let validator = Hs256JwtValidator::new(&settings).unwrap();

        assert!(validator.validate(&issued.access_token, at(10_060)).is_ok());
        assert!(validator.validate(&issued.access_token, at(10_090)).is_ok());
        assert_eq!(
            validator.validate(&issued.access_token, at(10_091)),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issued = Hs256TokenIssuer::new(&settings()).issue("admin", Utc::now()).unwrap();

        let mut other = settings();
        other.secret = b"another-secret-that-is-long-enough-for-hs256".to_vec();
        assert_eq!(
            Hs256JwtValidator::new(&other).unwrap().validate(&issued.access_token, Utc::now()),
            Err(TokenValidationError::InvalidSignature)
        );
    }

    #[test]
    fn wrong_issuer_or_audience_is_rejected() {
        let settings = settings();
        let validator = Hs256JwtValidator::new(&settings).unwrap();

        let mut foreign_issuer = settings.clone();
        foreign_issuer.issuer = "someone-else".to_string();
        let token = Hs256TokenIssuer::new(&foreign_issuer).issue("admin", Utc::now()).unwrap();
        assert_eq!(
            validator.validate(&token.access_token, Utc::now()),
            Err(TokenValidationError::InvalidIssuer)
        );

        let mut foreign_audience = settings.clone();
        foreign_audience.audience = "other-clients".to_string();
        let token = Hs256TokenIssuer::new(&foreign_audience).issue("admin", Utc::now()).unwrap();
        assert_eq!(
            validator.validate(&token.access_token, Utc::now()),
            Err(TokenValidationError::InvalidAudience)
        );
    }

    #[test]
    fn other_hmac_algorithms_are_rejected() {
        let settings = settings();
        let now = Utc::now();
        let claims = Hs256TokenIssuer::new(&settings).issue("admin", now).unwrap().claims;

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            Hs256JwtValidator::new(&settings).unwrap().validate(&token, now),
            Err(TokenValidationError::InvalidSignature)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        let err = Hs256JwtValidator::new(&settings())
            .unwrap()
            .validate("not-a-jwt", Utc::now())
            .unwrap_err();
        assert!(matches!(err, TokenValidationError::Malformed(_)));
    }

    #[test]
    fn out_of_range_lifetime_and_skew_are_reported() {
        let now = Utc::now();
        assert!(settings().check_ranges(now).is_ok());

        let mut long_lived = settings();
        long_lived.token_ttl = Duration::from_secs(10_000_000_000_000);
        assert!(matches!(long_lived.check_ranges(now), Err(TokenError::InvalidTtl(_))));
        assert!(matches!(
            Hs256TokenIssuer::new(&long_lived).issue("admin", now),
            Err(TokenError::InvalidTtl(_))
        ));

        let mut lenient = settings();
        lenient.clock_skew = Duration::from_secs(u64::MAX);
        assert!(matches!(lenient.check_ranges(now), Err(TokenError::InvalidSkew(_))));
        assert!(matches!(Hs256JwtValidator::new(&lenient), Err(TokenError::InvalidSkew(_))));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains("<redacted>"));
    }
}
