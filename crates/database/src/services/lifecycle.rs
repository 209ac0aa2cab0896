use crate::entities::od_request::Model;
use crate::store::{RequestStore, StoreError, Transition};
use chrono::{NaiveDate, Utc};
use models::{
    codes::{CourseCode, EnrollmentNumber, split_codes},
    schedule,
    status::RequestStatus,
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{0}")]
    Validation(String),
    #[error("Request not found")]
    NotFound,
    #[error("Request already {0}")]
    AlreadyDecided(RequestStatus),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Raw submission fields, as received from the public form.
#[derive(Debug, Clone, Default)]
pub struct NewRequest {
    pub name: String,
    pub enrollment_number: String,
    pub email: String,
    pub subject_code: String,
    pub faculty_code: String,
    pub date: String,
    pub time_from: String,
    pub time_to: String,
    pub reason: String,
}

/// Owns the request lifecycle: batch creation from a submitted time range,
/// the one-shot Pending -> Approved/Rejected transitions, and the
/// post-export purge.
#[derive(Clone)]
pub struct RequestService {
    store: Arc<dyn RequestStore>,
}

impl RequestService {
    pub fn new(store: Arc<dyn RequestStore>) -> Self {
        Self { store }
    }

    /// Validates a submission, expands its time range onto the daily
    /// schedule, and persists one `Pending` record per covered period.
    pub async fn submit(&self, input: NewRequest) -> Result<Vec<Model>, LifecycleError> {
        let name = required("name", &input.name)?;
        let reason = required("reason", &input.reason)?;

        let email = required("email", &input.email)?;
        if !email_shaped(&email) {
            return Err(validation("email address is not valid"));
        }

        let enrollment = input
            .enrollment_number
            .trim()
            .parse::<EnrollmentNumber>()
            .map_err(|err| validation(format!("enrollment number: {err}")))?;

        let date = NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d")
            .map_err(|_| validation("date must be in YYYY-MM-DD form"))?;
        let now = Utc::now().naive_utc();
        if date > now.date() {
            return Err(validation("date must not be in the future"));
        }

        let time_from = schedule::parse_clock_time(&input.time_from)
            .ok_or_else(|| validation("timeFrom is not a valid time"))?;
        let time_to = schedule::parse_clock_time(&input.time_to)
            .ok_or_else(|| validation("timeTo is not a valid time"))?;
        if time_to <= time_from {
            return Err(validation("timeTo must be after timeFrom"));
        }

        let slots = schedule::overlapping_periods(time_from, time_to);
        if slots.is_empty() {
            return Err(validation("no valid period selected"));
        }

        let subject_codes = parse_codes("subject code", &input.subject_code, slots.len())?;
        let faculty_codes = parse_codes("faculty code", &input.faculty_code, slots.len())?;

        let records: Vec<Model> = slots
            .iter()
            .zip(subject_codes.iter().zip(faculty_codes.iter()))
            .map(|(slot, (subject, faculty))| Model {
                id: Uuid::new_v4(),
                name: name.clone(),
                enrollment_number: enrollment.as_str().to_owned(),
                email: email.clone(),
                subject_code: subject.as_str().to_owned(),
                faculty_code: faculty.as_str().to_owned(),
                date,
                time_from: slot.from,
                time_to: slot.to,
                reason: reason.clone(),
                status: RequestStatus::Pending,
                created_at: now,
                updated_at: now,
            })
            .collect();

        self.store.insert_many(records.clone()).await?;

        Ok(records)
    }

    /// All non-purged records, newest first.
    pub async fn list(&self, status: Option<RequestStatus>) -> Result<Vec<Model>, LifecycleError> {
        Ok(self.store.all(status).await?)
    }

    pub async fn approve(&self, id: Uuid) -> Result<Model, LifecycleError> {
        self.decide(id, RequestStatus::Approved).await
    }

    pub async fn reject(&self, id: Uuid) -> Result<Model, LifecycleError> {
        self.decide(id, RequestStatus::Rejected).await
    }

    async fn decide(&self, id: Uuid, status: RequestStatus) -> Result<Model, LifecycleError> {
        match self
            .store
            .transition(id, status, Utc::now().naive_utc())
            .await?
        {
            Transition::Applied(record) => Ok(record),
            Transition::AlreadyDecided(current) => Err(LifecycleError::AlreadyDecided(current)),
            Transition::NotFound => Err(LifecycleError::NotFound),
        }
    }

    /// The report generator's data source.
    pub async fn approved(&self) -> Result<Vec<Model>, LifecycleError> {
        Ok(self.store.all(Some(RequestStatus::Approved)).await?)
    }

    /// Removes every decided record once a report has been filed. Both
    /// approved and rejected records go; pending ones stay.
    pub async fn purge_processed(&self) -> Result<u64, LifecycleError> {
        Ok(self.store.delete_decided().await?)
    }
}

fn validation(message: impl Into<String>) -> LifecycleError {
    LifecycleError::Validation(message.into())
}

fn required(field: &str, value: &str) -> Result<String, LifecycleError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(validation(format!("{field} is required")));
    }
    Ok(value.to_owned())
}

fn parse_codes(
    field: &str,
    input: &str,
    expected: usize,
) -> Result<Vec<CourseCode>, LifecycleError> {
    let tokens = split_codes(input, expected).map_err(|err| {
        validation(format!(
            "the request spans {expected} periods; {field}s: {err}"
        ))
    })?;

    tokens
        .iter()
        .map(|token| {
            token
                .parse::<CourseCode>()
                .map_err(|err| validation(format!("{field} \"{token}\": {err}")))
        })
        .collect()
}

fn email_shaped(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !address.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<Vec<Model>>,
    }

    #[async_trait]
    impl RequestStore for MemoryStore {
        async fn insert_many(&self, records: Vec<Model>) -> Result<(), StoreError> {
            self.records.lock().unwrap().extend(records);
            Ok(())
        }

        async fn all(&self, status: Option<RequestStatus>) -> Result<Vec<Model>, StoreError> {
            let mut rows: Vec<Model> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|record| status.is_none_or(|wanted| record.status == wanted))
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn find(&self, id: Uuid) -> Result<Option<Model>, StoreError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|record| record.id == id)
                .cloned())
        }

        async fn transition(
            &self,
            id: Uuid,
            status: RequestStatus,
            at: NaiveDateTime,
        ) -> Result<Transition, StoreError> {
            let mut records = self.records.lock().unwrap();
            let Some(record) = records.iter_mut().find(|record| record.id == id) else {
                return Ok(Transition::NotFound);
            };

            if record.status != RequestStatus::Pending {
                return Ok(Transition::AlreadyDecided(record.status));
            }

            record.status = status;
            record.updated_at = at;
            Ok(Transition::Applied(record.clone()))
        }

        async fn delete_decided(&self) -> Result<u64, StoreError> {
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|record| record.status == RequestStatus::Pending);
            Ok((before - records.len()) as u64)
        }
    }

    fn service() -> RequestService {
        RequestService::new(Arc::new(MemoryStore::default()))
    }

    fn today() -> String {
        Utc::now().date_naive().format("%Y-%m-%d").to_string()
    }

    fn two_period_submission() -> NewRequest {
        NewRequest {
            name: "Asha Rao".to_owned(),
            enrollment_number: "A123".to_owned(),
            email: "asha@example.edu".to_owned(),
            subject_code: "CS101 CS102".to_owned(),
            faculty_code: "FC1 FC2".to_owned(),
            date: today(),
            time_from: "09:15 AM".to_owned(),
            time_to: "11:10 AM".to_owned(),
            reason: "Inter-college hackathon".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_two_period_submission_creates_two_pending_records() {
        let service = service();

        let records = service.submit(two_period_submission()).await.unwrap();

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.status, RequestStatus::Pending);
            assert_eq!(record.created_at, records[0].created_at);
        }

        // Codes are matched positionally to periods in schedule order
        assert_eq!(records[0].subject_code, "CS101");
        assert_eq!(records[0].faculty_code, "FC1");
        assert_eq!(records[1].subject_code, "CS102");
        assert_eq!(records[1].faculty_code, "FC2");

        // Each record carries its own period's boundaries, not the raw range
        assert_eq!(records[0].time_from, schedule::DAILY_PERIODS[0].from);
        assert_eq!(records[0].time_to, schedule::DAILY_PERIODS[0].to);
        assert_eq!(records[1].time_from, schedule::DAILY_PERIODS[1].from);
        assert_eq!(records[1].time_to, schedule::DAILY_PERIODS[1].to);
    }

    #[tokio::test]
    async fn test_single_period_submission_keeps_code_fields_whole() {
        let service = service();
        let input = NewRequest {
            subject_code: "CS101".to_owned(),
            faculty_code: "FC1".to_owned(),
            time_from: "09:30".to_owned(),
            time_to: "10:00".to_owned(),
            ..two_period_submission()
        };

        let records = service.submit(input).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject_code, "CS101");
        assert_eq!(records[0].time_from, schedule::DAILY_PERIODS[0].from);
    }

    #[tokio::test]
    async fn test_submission_outside_schedule_is_rejected() {
        let service = service();
        let input = NewRequest {
            time_from: "07:00".to_owned(),
            time_to: "08:00".to_owned(),
            ..two_period_submission()
        };

        let err = service.submit(input).await.unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(msg) if msg.contains("no valid period")));
    }

    #[tokio::test]
    async fn test_submission_with_too_few_codes_is_rejected() {
        let service = service();
        let input = NewRequest {
            subject_code: "CS101".to_owned(),
            ..two_period_submission()
        };

        assert!(matches!(
            service.submit(input).await,
            Err(LifecycleError::Validation(_))
        ));

        // Nothing was persisted
        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submission_with_future_date_is_rejected() {
        let service = service();
        let input = NewRequest {
            date: (Utc::now().date_naive() + chrono::Days::new(2))
                .format("%Y-%m-%d")
                .to_string(),
            ..two_period_submission()
        };

        assert!(matches!(
            service.submit(input).await,
            Err(LifecycleError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_submission_with_bad_enrollment_number_is_rejected() {
        let service = service();

        for bad in ["B123", "A12B"] {
            let input = NewRequest {
                enrollment_number: bad.to_owned(),
                ..two_period_submission()
            };
            assert!(matches!(
                service.submit(input).await,
                Err(LifecycleError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_decision_is_one_shot() {
        let service = service();
        let records = service.submit(two_period_submission()).await.unwrap();
        let id = records[0].id;

        let approved = service.approve(id).await.unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);

        // A decided record cannot be decided again, in either direction
        assert!(matches!(
            service.reject(id).await,
            Err(LifecycleError::AlreadyDecided(RequestStatus::Approved))
        ));
        assert!(matches!(
            service.approve(id).await,
            Err(LifecycleError::AlreadyDecided(RequestStatus::Approved))
        ));
    }

    #[tokio::test]
    async fn test_deciding_unknown_id_is_not_found() {
        let service = service();

        assert!(matches!(
            service.approve(Uuid::new_v4()).await,
            Err(LifecycleError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_purge_removes_decided_records_only() {
        let service = service();
        let records = service.submit(two_period_submission()).await.unwrap();
        service.approve(records[0].id).await.unwrap();
        service.reject(records[1].id).await.unwrap();

        let pending = service.submit(two_period_submission()).await.unwrap();

        let deleted = service.purge_processed().await.unwrap();
        assert_eq!(deleted, 2);

        let remaining = service.list(None).await.unwrap();
        assert_eq!(remaining.len(), pending.len());
        assert!(
            remaining
                .iter()
                .all(|record| record.status == RequestStatus::Pending)
        );
        assert!(service.approved().await.unwrap().is_empty());
    }

    #[test]
    fn test_email_shape_check() {
        assert!(email_shaped("student@example.edu"));

        assert!(!email_shaped("studentexample.edu"));
        assert!(!email_shaped("@example.edu"));
        assert!(!email_shaped("student@edu"));
        assert!(!email_shaped("student @example.edu"));
    }
}
