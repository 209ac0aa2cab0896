use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OdRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OdRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OdRequests::Name).string().not_null())
                    .col(
                        ColumnDef::new(OdRequests::EnrollmentNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OdRequests::Email).string().not_null())
                    .col(ColumnDef::new(OdRequests::SubjectCode).string().not_null())
                    .col(ColumnDef::new(OdRequests::FacultyCode).string().not_null())
                    .col(ColumnDef::new(OdRequests::Date).date().not_null())
                    .col(ColumnDef::new(OdRequests::TimeFrom).time().not_null())
                    .col(ColumnDef::new(OdRequests::TimeTo).time().not_null())
                    .col(ColumnDef::new(OdRequests::Reason).text().not_null())
                    .col(
                        ColumnDef::new(OdRequests::Status)
                            .string_len(16)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(OdRequests::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(OdRequests::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OdRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OdRequests {
    Table,
    Id,
    Name,
    EnrollmentNumber,
    Email,
    SubjectCode,
    FacultyCode,
    Date,
    TimeFrom,
    TimeTo,
    Reason,
    Status,
    CreatedAt,
    UpdatedAt,
}
