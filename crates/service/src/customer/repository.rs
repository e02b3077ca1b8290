use async_trait::async_trait;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Optional per-field match conditions, AND-combined.
/// Present fields match case-insensitively as substrings.
#[derive(Clone, Debug, Default)]
pub struct CustomerFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
}

/// Input for creating a customer; the store assigns the id.
#[derive(Clone, Debug)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub company: String,
}

/// One row of the by-city aggregate. Serializes with the city under `_id`
/// so the wire shape stays `{_id, count}`.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct CityCount {
    #[serde(rename = "_id")]
    pub city: String,
    pub count: i64,
}

/// Data access contract for the customer store.
///
/// Implementations: [`super::SeaOrmCustomerRepository`] for the real
/// database, [`super::memory::MemoryCustomerRepository`] for tests and
/// database-free runs. Failures carry no retry semantics; every call is a
/// single attempt.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Filtered, paginated listing. Absent filter fields impose no constraint.
    async fn find(
        &self,
        filter: &CustomerFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<models::customer::Model>, ServiceError>;

    /// Total matching count for the same filter semantics as `find`,
    /// ignoring pagination.
    async fn count(&self, filter: &CustomerFilter) -> Result<u64, ServiceError>;

    /// Exact lookup; `Ok(None)` when no record has the id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<models::customer::Model>, ServiceError>;

    /// One entry per distinct city with the number of records sharing it.
    /// No ordering guarantee.
    async fn aggregate_by_city(&self) -> Result<Vec<CityCount>, ServiceError>;

    /// Distinct city values currently in the store.
    async fn distinct_cities(&self) -> Result<Vec<String>, ServiceError>;

    /// Distinct company values currently in the store.
    async fn distinct_companies(&self) -> Result<Vec<String>, ServiceError>;

    /// Persist a new record; the store assigns the id and the stored record
    /// is returned.
    async fn create(&self, input: NewCustomer) -> Result<models::customer::Model, ServiceError>;
}
