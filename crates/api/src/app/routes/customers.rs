use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use clientes_core::CustomerId;
use clientes_customers::{Customer, CustomerDraft};

use crate::app::API_PREFIX;
use crate::app::dto::CustomerRequest;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(replace_customer).delete(delete_customer),
        )
}

pub async fn list_customers(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<Customer>> {
    Json(services.customers.list_all())
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let id = parse_id(&id)?;
    services.customers.get(id).map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let draft = CustomerDraft::required(body.first_name(), body.last_name())?;

    let created = services.customers.add(&draft.first_name, &draft.last_name);
    tracing::info!(customer_id = %created.id, by = %principal.username(), "customer created");

    let location = format!("{API_PREFIX}/clientes/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}

pub async fn replace_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;

    if !services.customers.update(id, body.first_name(), body.last_name()) {
        return Err(ApiError::NotFound);
    }

    tracing::info!(customer_id = %id, by = %principal.username(), "customer replaced");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    if !services.customers.delete(id) {
        return Err(ApiError::NotFound);
    }

    tracing::info!(customer_id = %id, by = %principal.username(), "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Ids that are not non-negative integers never match a resource.
fn parse_id(raw: &str) -> Result<CustomerId, ApiError> {
    raw.parse::<CustomerId>().map_err(ApiError::from)
}
