use clientes_auth::JwtClaims;

/// Principal context for a request (the authenticated identity).
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    username: String,
    token_id: String,
}

impl PrincipalContext {
    pub fn new(username: impl Into<String>, token_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token_id: token_id.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }
}

impl From<JwtClaims> for PrincipalContext {
    fn from(claims: JwtClaims) -> Self {
        Self::new(claims.sub, claims.jti)
    }
}
