use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect,
};
use uuid::Uuid;

use async_trait::async_trait;
use models::customer::{self, Entity as Customer};

use crate::customer::repository::{CityCount, CustomerFilter, CustomerRepository, NewCustomer};
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn substring_pattern(value: &str) -> String {
    format!("%{}%", value)
}

/// AND of `ILIKE '%v%'` conditions for the present filter fields.
fn filter_condition(filter: &CustomerFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(v) = &filter.first_name {
        cond = cond.add(Expr::col(customer::Column::FirstName).ilike(substring_pattern(v)));
    }
    if let Some(v) = &filter.last_name {
        cond = cond.add(Expr::col(customer::Column::LastName).ilike(substring_pattern(v)));
    }
    if let Some(v) = &filter.city {
        cond = cond.add(Expr::col(customer::Column::City).ilike(substring_pattern(v)));
    }
    cond
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find(
        &self,
        filter: &CustomerFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<customer::Model>, ServiceError> {
        Customer::find()
            .filter(filter_condition(filter))
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn count(&self, filter: &CustomerFilter) -> Result<u64, ServiceError> {
        Customer::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<customer::Model>, ServiceError> {
        Customer::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn aggregate_by_city(&self) -> Result<Vec<CityCount>, ServiceError> {
        Customer::find()
            .select_only()
            .column(customer::Column::City)
            .column_as(customer::Column::Id.count(), "count")
            .group_by(customer::Column::City)
            .into_model::<CityCount>()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn distinct_cities(&self) -> Result<Vec<String>, ServiceError> {
        Customer::find()
            .select_only()
            .column(customer::Column::City)
            .distinct()
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn distinct_companies(&self) -> Result<Vec<String>, ServiceError> {
        Customer::find()
            .select_only()
            .column(customer::Column::Company)
            .distinct()
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn create(&self, input: NewCustomer) -> Result<customer::Model, ServiceError> {
        let created = customer::create(
            &self.db,
            &input.first_name,
            &input.last_name,
            &input.city,
            &input.company,
        )
        .await?;
        Ok(created)
    }
}
