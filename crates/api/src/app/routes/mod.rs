use axum::{Router, routing::get};

pub mod auth;
pub mod customers;
pub mod system;

/// Router for anonymous endpoints (token issuance).
pub fn public_router() -> Router {
    Router::new().nest("/auth", auth::router())
}

/// Router for all endpoints that require a bearer token.
pub fn protected_router() -> Router {
    Router::new()
        .route("/auth/me", get(auth::whoami))
        .nest("/clientes", customers::router())
}
