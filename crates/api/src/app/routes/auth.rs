use std::sync::Arc;

use axum::{Json, Router, extract::Extension, extract::rejection::JsonRejection, routing::post};
use chrono::Utc;

use crate::app::dto::{LoginRequest, LoginResponse, WhoAmIResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/login", post(login))
}

/// Exchange demo credentials for a bearer token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = payload?;
    if !services.credentials.verify(&body.username, &body.password) {
        tracing::warn!(username = %body.username, "login rejected");
        return Err(ApiError::InvalidCredentials);
    }

    let issued = services
        .tokens
        .issue(&body.username, Utc::now())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(username = %body.username, token_id = %issued.claims.jti, "token issued");

    Ok(Json(LoginResponse {
        access_token: issued.access_token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
    }))
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> Json<WhoAmIResponse> {
    Json(WhoAmIResponse {
        username: principal.username().to_string(),
        token_id: principal.token_id().to_string(),
    })
}
