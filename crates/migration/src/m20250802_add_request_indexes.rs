use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on status for the approved/decided scans used by exports
        manager
            .create_index(
                Index::create()
                    .name("idx_od_requests_status")
                    .table(OdRequests::Table)
                    .col(OdRequests::Status)
                    .to_owned(),
            )
            .await?;

        // Index on created_at for the newest-first dashboard listing
        manager
            .create_index(
                Index::create()
                    .name("idx_od_requests_created_at")
                    .table(OdRequests::Table)
                    .col(OdRequests::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(Index::drop().name("idx_od_requests_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_od_requests_status").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum OdRequests {
    Table,
    Status,
    CreatedAt,
}
