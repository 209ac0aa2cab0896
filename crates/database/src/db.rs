use sea_orm::{Database, DatabaseConnection, DbErr};

/// Creates a database connection
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
