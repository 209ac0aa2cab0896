use models::status::RequestStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "od_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub enrollment_number: String, // e.g. "A123"
    pub email: String,
    pub subject_code: String, // e.g. "CS101"
    pub faculty_code: String,
    pub date: Date,
    // Always one schedule period's boundaries, never the raw submitted range
    pub time_from: Time,
    pub time_to: Time,
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
