use chrono::{NaiveDate, NaiveDateTime};
use database::{entities::od_request::Model, services::lifecycle::NewRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Public submission payload. Field names match the student form.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequestBody {
    pub name: String,
    pub enrollment_number: String,
    pub email: String,
    /// One code, or one code per covered period separated by spaces
    pub subject_code: String,
    pub faculty_code: String,
    /// Calendar date of the absence, `YYYY-MM-DD`
    pub date: String,
    /// 12-hour ("09:15 AM") or 24-hour ("09:15") wall-clock time
    pub time_from: String,
    pub time_to: String,
    pub reason: String,
}

impl From<SubmitRequestBody> for NewRequest {
    fn from(body: SubmitRequestBody) -> Self {
        Self {
            name: body.name,
            enrollment_number: body.enrollment_number,
            email: body.email,
            subject_code: body.subject_code,
            faculty_code: body.faculty_code,
            date: body.date,
            time_from: body.time_from,
            time_to: body.time_to,
            reason: body.reason,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: String,
    pub name: String,
    pub enrollment_number: String,
    pub email: String,
    pub subject_code: String,
    pub faculty_code: String,
    pub date: NaiveDate,
    /// Covered period boundary in 12-hour form
    pub time_from: String,
    pub time_to: String,
    pub reason: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Model> for RequestResponse {
    fn from(record: Model) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            enrollment_number: record.enrollment_number,
            email: record.email,
            subject_code: record.subject_code,
            faculty_code: record.faculty_code,
            date: record.date,
            time_from: record.time_from.format("%I:%M %p").to_string(),
            time_to: record.time_to.format("%I:%M %p").to_string(),
            reason: record.reason,
            status: record.status.to_string(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    pub message: String,
    pub requests: Vec<RequestResponse>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ListQuery {
    /// Optional status filter: Pending, Approved or Rejected
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DecisionBody {
    /// Must be "Approved" or "Rejected"
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailReportBody {
    pub email: String,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailReportResponse {
    pub success: bool,
    pub message: String,
    pub request_count: usize,
    pub deleted_count: u64,
}
