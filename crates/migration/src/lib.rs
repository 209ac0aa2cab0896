pub use sea_orm_migration::prelude::*;

mod m20250801_create_od_requests;
mod m20250802_add_request_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_create_od_requests::Migration),
            Box::new(m20250802_add_request_indexes::Migration),
        ]
    }
}
