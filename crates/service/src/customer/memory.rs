use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use models::customer::{self, Model};

use crate::customer::repository::{CityCount, CustomerFilter, CustomerRepository, NewCustomer};
use crate::errors::ServiceError;

/// In-memory repository with the same observable semantics as the database
/// implementation. Used by tests and database-free runs.
#[derive(Clone, Default)]
pub struct MemoryCustomerRepository {
    inner: Arc<RwLock<Vec<Model>>>,
}

impl MemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store, assigning ids as the database would.
    pub async fn seed(&self, records: Vec<NewCustomer>) -> Vec<Model> {
        let mut out = Vec::with_capacity(records.len());
        for r in records {
            // seeding bypasses validation on purpose
            let model = Model {
                id: Uuid::new_v4(),
                first_name: r.first_name,
                last_name: r.last_name,
                city: r.city,
                company: r.company,
            };
            self.inner.write().await.push(model.clone());
            out.push(model);
        }
        out
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(filter: &CustomerFilter, m: &Model) -> bool {
    filter
        .first_name
        .as_deref()
        .map_or(true, |v| contains_ci(&m.first_name, v))
        && filter
            .last_name
            .as_deref()
            .map_or(true, |v| contains_ci(&m.last_name, v))
        && filter.city.as_deref().map_or(true, |v| contains_ci(&m.city, v))
}

#[async_trait]
impl CustomerRepository for MemoryCustomerRepository {
    async fn find(
        &self,
        filter: &CustomerFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Model>, ServiceError> {
        let records = self.inner.read().await;
        Ok(records
            .iter()
            .filter(|m| matches(filter, m))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &CustomerFilter) -> Result<u64, ServiceError> {
        let records = self.inner.read().await;
        Ok(records.iter().filter(|m| matches(filter, m)).count() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
        let records = self.inner.read().await;
        Ok(records.iter().find(|m| m.id == id).cloned())
    }

    async fn aggregate_by_city(&self) -> Result<Vec<CityCount>, ServiceError> {
        let records = self.inner.read().await;
        let mut counts: HashMap<String, i64> = HashMap::new();
        for m in records.iter() {
            *counts.entry(m.city.clone()).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(city, count)| CityCount { city, count })
            .collect())
    }

    async fn distinct_cities(&self) -> Result<Vec<String>, ServiceError> {
        let records = self.inner.read().await;
        let mut out: Vec<String> = Vec::new();
        for m in records.iter() {
            if !out.contains(&m.city) {
                out.push(m.city.clone());
            }
        }
        Ok(out)
    }

    async fn distinct_companies(&self) -> Result<Vec<String>, ServiceError> {
        let records = self.inner.read().await;
        let mut out: Vec<String> = Vec::new();
        for m in records.iter() {
            if !out.contains(&m.company) {
                out.push(m.company.clone());
            }
        }
        Ok(out)
    }

    async fn create(&self, input: NewCustomer) -> Result<Model, ServiceError> {
        customer::validate_field("first_name", &input.first_name)?;
        customer::validate_field("last_name", &input.last_name)?;
        customer::validate_field("city", &input.city)?;
        customer::validate_field("company", &input.company)?;
        let model = Model {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            city: input.city,
            company: input.company,
        };
        self.inner.write().await.push(model.clone());
        Ok(model)
    }
}
