use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub company: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Reject empty or whitespace-only field values.
pub fn validate_field(name: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{} required", name)));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    city: &str,
    company: &str,
) -> Result<Model, errors::ModelError> {
    validate_field("first_name", first_name)?;
    validate_field("last_name", last_name)?;
    validate_field("city", city)?;
    validate_field("company", company)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        city: Set(city.to_string()),
        company: Set(company.to_string()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank() {
        assert!(validate_field("city", "").is_err());
        assert!(validate_field("city", "   ").is_err());
        assert!(validate_field("city", "Austin").is_ok());
    }

    #[test]
    fn model_serializes_all_business_fields() {
        let m = Model {
            id: Uuid::new_v4(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            city: "Austin".into(),
            company: "Acme".into(),
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["first_name"], "Jane");
        assert_eq!(v["city"], "Austin");
        assert!(v["id"].is_string());
    }

    #[tokio::test]
    async fn customer_insert_roundtrip() {
        if std::env::var("DATABASE_URL").is_err() {
            eprintln!("skip: DATABASE_URL missing");
            return;
        }
        let db = match crate::db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return;
            }
        };
        use migration::MigratorTrait;
        if let Err(e) = migration::Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return;
        }
        let created = create(&db, "Jane", "Doe", "Austin", "Acme").await.expect("create");
        let found = Entity::find_by_id(created.id).one(&db).await.expect("query");
        assert_eq!(found, Some(created.clone()));
        Entity::delete_by_id(created.id).exec(&db).await.expect("cleanup");
    }
}
