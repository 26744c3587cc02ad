use serde::{Deserialize, Serialize};

// -------------------------
// Request DTOs
// -------------------------

/// Login body. Missing fields bind as empty strings and simply fail the
/// credential check.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "Username")]
    pub username: String,
    #[serde(default, alias = "Password")]
    pub password: String,
}

/// Create/replace body for a customer. Any `id` sent by the client is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerRequest {
    #[serde(default, alias = "Nome")]
    pub nome: Option<String>,
    #[serde(default, alias = "Sobrenome")]
    pub sobrenome: Option<String>,
}

impl CustomerRequest {
    pub fn first_name(&self) -> &str {
        self.nome.as_deref().unwrap_or_default()
    }

    pub fn last_name(&self) -> &str {
        self.sobrenome.as_deref().unwrap_or_default()
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub username: String,
    /// `jti` of the bearer token used for this request.
    pub token_id: String,
}
