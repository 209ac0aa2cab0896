use crate::entities::od_request::{self, Entity as OdRequest, Model};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use models::status::RequestStatus;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Outcome of a compare-and-swap status transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Applied(Model),
    /// The record had already left `Pending`; carries the status it holds.
    AlreadyDecided(RequestStatus),
    NotFound,
}

/// Storage interface for OD request records.
///
/// The lifecycle service only talks to this trait, so tests can substitute an
/// in-memory implementation and the transition guard stays in one place.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Inserts one submission batch.
    async fn insert_many(&self, records: Vec<Model>) -> Result<(), StoreError>;

    /// All stored records, newest `created_at` first, optionally filtered by
    /// status.
    async fn all(&self, status: Option<RequestStatus>) -> Result<Vec<Model>, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<Model>, StoreError>;

    /// Applies `Pending -> status` only if the record is still `Pending`.
    async fn transition(
        &self,
        id: Uuid,
        status: RequestStatus,
        at: NaiveDateTime,
    ) -> Result<Transition, StoreError>;

    /// Hard-deletes every `Approved` and `Rejected` record, returning the
    /// number removed. `Pending` records are untouched.
    async fn delete_decided(&self) -> Result<u64, StoreError>;
}

/// sea-orm backed store over the `od_requests` table.
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_active(record: Model) -> od_request::ActiveModel {
        od_request::ActiveModel {
            id: Set(record.id),
            name: Set(record.name),
            enrollment_number: Set(record.enrollment_number),
            email: Set(record.email),
            subject_code: Set(record.subject_code),
            faculty_code: Set(record.faculty_code),
            date: Set(record.date),
            time_from: Set(record.time_from),
            time_to: Set(record.time_to),
            reason: Set(record.reason),
            status: Set(record.status),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        }
    }
}

#[async_trait]
impl RequestStore for DbStore {
    async fn insert_many(&self, records: Vec<Model>) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let rows = records.into_iter().map(Self::to_active);
        OdRequest::insert_many(rows).exec(&self.db).await?;

        Ok(())
    }

    async fn all(&self, status: Option<RequestStatus>) -> Result<Vec<Model>, StoreError> {
        let mut query = OdRequest::find();

        if let Some(status) = status {
            query = query.filter(od_request::Column::Status.eq(status));
        }

        Ok(query
            .order_by_desc(od_request::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Model>, StoreError> {
        Ok(OdRequest::find_by_id(id).one(&self.db).await?)
    }

    async fn transition(
        &self,
        id: Uuid,
        status: RequestStatus,
        at: NaiveDateTime,
    ) -> Result<Transition, StoreError> {
        // Guarded update: only a still-Pending row is touched, so a lost race
        // shows up as zero affected rows instead of a silent overwrite
        let result = OdRequest::update_many()
            .col_expr(od_request::Column::Status, Expr::value(status))
            .col_expr(od_request::Column::UpdatedAt, Expr::value(at))
            .filter(od_request::Column::Id.eq(id))
            .filter(od_request::Column::Status.eq(RequestStatus::Pending))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(match self.find(id).await? {
                Some(record) => Transition::AlreadyDecided(record.status),
                None => Transition::NotFound,
            });
        }

        match self.find(id).await? {
            Some(record) => Ok(Transition::Applied(record)),
            None => Ok(Transition::NotFound),
        }
    }

    async fn delete_decided(&self) -> Result<u64, StoreError> {
        let result = OdRequest::delete_many()
            .filter(
                od_request::Column::Status
                    .is_in([RequestStatus::Approved, RequestStatus::Rejected]),
            )
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
