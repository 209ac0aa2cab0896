use crate::config::SmtpConfig;
use database::entities::od_request::Model;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Attachment, Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use models::status::RequestStatus;
use thiserror::Error;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const REPORT_FILENAME: &str = "approved-od-requests.xlsx";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outbound SMTP notifications: decision notices to students and the
/// report mail to the administration.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailerError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from = config.from.parse::<Mailbox>()?;

        Ok(Self { transport, from })
    }

    /// Tells a student how their request was decided. Callers treat this as
    /// best-effort; the decision itself is already committed.
    pub async fn send_decision_notice(&self, record: &Model) -> Result<(), MailerError> {
        let (verb, subject) = match record.status {
            RequestStatus::Approved => (
                "APPROVED",
                format!("OD Request Approved - {}", record.subject_code),
            ),
            RequestStatus::Rejected => (
                "REJECTED",
                format!("OD Request Rejected - {}", record.subject_code),
            ),
            RequestStatus::Pending => return Ok(()),
        };

        let body = format!(
            "Dear {name},\n\n\
             Your OD request has been {verb} by the coordinator.\n\n\
             Request details:\n\
             - Subject code: {subject_code}\n\
             - Faculty code: {faculty_code}\n\
             - Date: {date}\n\
             - Time: {time_from} to {time_to}\n\
             - Reason: {reason}\n\
             - Enrollment number: {enrollment}\n\n\
             OD Automation System\n",
            name = record.name,
            subject_code = record.subject_code,
            faculty_code = record.faculty_code,
            date = record.date,
            time_from = record.time_from.format("%I:%M %p"),
            time_to = record.time_to.format("%I:%M %p"),
            reason = record.reason,
            enrollment = record.enrollment_number,
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(record.email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.transport.send(message).await?;
        Ok(())
    }

    /// Sends the rendered workbook as an attachment. The caller purges
    /// processed records only after this returns Ok.
    pub async fn send_report(
        &self,
        to: &str,
        subject: Option<&str>,
        message: Option<&str>,
        workbook: Vec<u8>,
    ) -> Result<(), MailerError> {
        let body = format!(
            "Dear Coordinator,\n\n\
             Please find attached the approved OD requests report.\n\n\
             {}\n\n\
             OD Automation System\n",
            message.unwrap_or(
                "This report contains all approved OD requests for the current period."
            ),
        );

        let content_type =
            ContentType::parse(XLSX_MIME).expect("statically known spreadsheet MIME type");
        let attachment = Attachment::new(REPORT_FILENAME.to_owned()).body(workbook, content_type);

        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject.unwrap_or("Approved OD Requests Report"))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body))
                    .singlepart(attachment),
            )?;

        self.transport.send(email).await?;
        Ok(())
    }
}
