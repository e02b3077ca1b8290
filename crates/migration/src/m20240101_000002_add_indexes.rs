use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Customer: index on city (grouping + distinct-city lookups)
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_city")
                    .table(Customer::Table)
                    .col(Customer::City)
                    .to_owned(),
            )
            .await?;

        // Customer: index on company (distinct-company lookups)
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_company")
                    .table(Customer::Table)
                    .col(Customer::Company)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_customer_city").table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customer_company").table(Customer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customer { Table, City, Company }
