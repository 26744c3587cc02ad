//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: customer store, credential check and token issuer
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use clientes_auth::{Hs256JwtValidator, JwtValidator};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Path prefix of every versioned endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let validator = Hs256JwtValidator::new(&config.jwt).context("build token validator")?;
    let jwt: Arc<dyn JwtValidator> = Arc::new(validator);
    Ok(build_router(services::build_services(&config.jwt), jwt))
}

/// Assemble the router from explicit services (lets tests swap the store or
/// the credential backend).
pub fn build_router(services: services::AppServices, jwt: Arc<dyn JwtValidator>) -> Router {
    let auth_state = middleware::AuthState { jwt };

    // Protected routes: require a valid bearer token.
    let protected = routes::protected_router().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    let api = routes::public_router().merge(protected);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest(API_PREFIX, api)
        .layer(ServiceBuilder::new().layer(Extension(Arc::new(services))))
}
