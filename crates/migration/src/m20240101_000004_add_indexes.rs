use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Project: index on owner_id for the nested listing
        manager
            .create_index(
                Index::create()
                    .name("idx_project_owner")
                    .table(Project::Table)
                    .col(Project::OwnerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_project_owner").table(Project::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Project { Table, OwnerId }
