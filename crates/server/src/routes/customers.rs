use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::customer;
use service::customer::{CityCount, CustomerFilter, NewCustomer};
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    // raw strings: substituted with defaults when not positive integers
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomerPage {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub customers: Vec<customer::Model>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCustomerInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// `GET /customers` — filtered, paginated listing. The echoed `page` and
/// `limit` are the values actually used for the query.
pub async fn list_customers(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<CustomerPage>, ApiError> {
    let filter = CustomerFilter {
        first_name: q.first_name,
        last_name: q.last_name,
        city: q.city,
    };
    let page = Pagination::from_raw(q.page.as_deref(), q.limit.as_deref());
    let (customers, total) = state.customers.list(&filter, page).await?;
    Ok(Json(CustomerPage {
        total,
        page: page.page,
        limit: page.limit,
        customers,
    }))
}

/// `GET /customers/:id`. A malformed id is a store-layer failure (500),
/// not a 404; only a well-formed id with no record yields 404.
pub async fn get_customer(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<customer::Model>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|e| ApiError::Store(e.to_string()))?;
    match state.customers.get(id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(ApiError::NotFound("Customer not found".into())),
    }
}

/// `GET /cities` — the by-city aggregate, verbatim.
pub async fn list_cities(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CityCount>>, ApiError> {
    Ok(Json(state.customers.cities().await?))
}

/// `POST /customers`. Field presence is checked before the city/company
/// existence policy; both failures are 400s with plain-text messages.
pub async fn create_customer(
    State(state): State<ServerState>,
    Json(input): Json<CreateCustomerInput>,
) -> Result<(StatusCode, Json<customer::Model>), ApiError> {
    let input = NewCustomer {
        first_name: input.first_name.unwrap_or_default(),
        last_name: input.last_name.unwrap_or_default(),
        city: input.city.unwrap_or_default(),
        company: input.company.unwrap_or_default(),
    };
    let created = state.customers.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
