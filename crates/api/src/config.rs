//! Runtime configuration: an optional JSON settings file overridden by
//! environment variables.
//!
//! The settings file mirrors the `Jwt` section layout:
//!
//! ```json
//! { "Jwt": { "Issuer": "...", "Audience": "...", "Key": "..." }, "BindAddr": "0.0.0.0:8080" }
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::Deserialize;

use clientes_auth::JwtSettings;
use clientes_auth::token::{DEFAULT_CLOCK_SKEW, DEFAULT_TOKEN_TTL};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ISSUER: &str = "RestClientesJwt";
pub const DEFAULT_AUDIENCE: &str = "RestClientesJwt";
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

/// HS256 needs a key of at least 256 bits.
pub const MIN_KEY_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt: JwtSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    jwt: Option<JwtSection>,
    bind_addr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JwtSection {
    issuer: Option<String>,
    audience: Option<String>,
    key: Option<String>,
    clock_skew_seconds: Option<u64>,
    token_ttl_seconds: Option<u64>,
}

impl ApiConfig {
    /// Load configuration for the running process.
    ///
    /// The settings file is `CLIENTES_SETTINGS` if set, otherwise
    /// `appsettings.json` when present in the working directory.
    pub fn from_env() -> Result<Self> {
        let contents = match std::env::var("CLIENTES_SETTINGS") {
            Ok(path) => Some(
                std::fs::read_to_string(&path)
                    .with_context(|| format!("read CLIENTES_SETTINGS: {path}"))?,
            ),
            Err(_) if Path::new(DEFAULT_SETTINGS_FILE).exists() => Some(
                std::fs::read_to_string(DEFAULT_SETTINGS_FILE)
                    .with_context(|| format!("read {DEFAULT_SETTINGS_FILE}"))?,
            ),
            Err(_) => None,
        };

        Self::resolve(contents.as_deref(), |name| std::env::var(name).ok())
    }

    /// Merge settings-file contents with environment lookups (environment wins).
    pub fn resolve(settings: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file: SettingsFile = match settings {
            Some(raw) => serde_json::from_str(raw).context("parse settings file")?,
            None => SettingsFile::default(),
        };
        let section = file.jwt.unwrap_or_default();

        let bind_addr = env("CLIENTES_BIND")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("parse bind address {bind_addr:?}"))?;

        let issuer = env("JWT_ISSUER")
            .or(section.issuer)
            .unwrap_or_else(|| DEFAULT_ISSUER.to_string());
        let audience = env("JWT_AUDIENCE")
            .or(section.audience)
            .unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());

        let key = env("JWT_KEY").or(section.key).unwrap_or_default();
        if key.trim().is_empty() {
            bail!("Jwt:Key is not configured (set JWT_KEY or Jwt.Key in the settings file)");
        }
        if key.len() < MIN_KEY_BYTES {
            bail!(
                "Jwt:Key is too short: {} bytes, at least {MIN_KEY_BYTES} required",
                key.len()
            );
        }

        let clock_skew = seconds(&env, "JWT_CLOCK_SKEW_SECONDS", section.clock_skew_seconds)?
            .unwrap_or(DEFAULT_CLOCK_SKEW);
        let token_ttl = seconds(&env, "JWT_TOKEN_TTL_SECONDS", section.token_ttl_seconds)?
            .unwrap_or(DEFAULT_TOKEN_TTL);
        if token_ttl.is_zero() {
            bail!("token lifetime must be positive");
        }

        let mut jwt = JwtSettings::new(issuer, audience, key.into_bytes());
        jwt.clock_skew = clock_skew;
        jwt.token_ttl = token_ttl;
        if let Err(e) = jwt.check_ranges(Utc::now()) {
            bail!("{e} (check JWT_TOKEN_TTL_SECONDS and JWT_CLOCK_SKEW_SECONDS)");
        }

        Ok(Self { bind_addr, jwt })
    }
}

fn seconds(
    env: &impl Fn(&str) -> Option<String>,
    name: &str,
    from_file: Option<u64>,
) -> Result<Option<Duration>> {
    let value = match env(name) {
        Some(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("parse {name}"))?,
        ),
        None => from_file,
    };
    Ok(value.map(Duration::from_secs))
}
