use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::customer::Model;

use crate::customer::repository::{CityCount, CustomerFilter, CustomerRepository, NewCustomer};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Application service encapsulating the customer business rules.
/// The repository is injected at startup so tests run against the
/// in-memory implementation.
#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    /// Page of matching records plus the total match count for the same
    /// filter (pagination ignored for the total).
    pub async fn list(
        &self,
        filter: &CustomerFilter,
        page: Pagination,
    ) -> Result<(Vec<Model>, u64), ServiceError> {
        let customers = self.repo.find(filter, page.skip(), page.limit).await?;
        let total = self.repo.count(filter).await?;
        Ok((customers, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    pub async fn cities(&self) -> Result<Vec<CityCount>, ServiceError> {
        self.repo.aggregate_by_city().await
    }

    /// Create with policy: all four fields present and non-empty, and both
    /// `city` and `company` must already exist among the stored distinct
    /// values. New customers cannot introduce new city or company values.
    #[instrument(skip(self, input), fields(city = %input.city, company = %input.company))]
    pub async fn create(&self, input: NewCustomer) -> Result<Model, ServiceError> {
        // presence check runs before any store call
        if [
            &input.first_name,
            &input.last_name,
            &input.city,
            &input.company,
        ]
        .iter()
        .any(|v| v.trim().is_empty())
        {
            return Err(ServiceError::Validation("All fields are required".into()));
        }

        let existing_cities = self.repo.distinct_cities().await?;
        let existing_companies = self.repo.distinct_companies().await?;
        if !existing_cities.contains(&input.city)
            || !existing_companies.contains(&input.company)
        {
            return Err(ServiceError::Validation(
                "City or company does not exist".into(),
            ));
        }

        let created = self.repo.create(input).await?;
        info!(customer_id = %created.id, "customer created");
        Ok(created)
    }
}
