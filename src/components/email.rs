use crate::components::meeting_store::Meeting;
use crate::error::MaestroResult;
use crate::utils::time::format_long_date;
use crate::utils::validation::escape_html;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

/// An outgoing email message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient addresses
    pub to: Vec<String>,
    pub subject: String,
    /// HTML body
    pub body: String,
}

/// Delivers email messages
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &EmailMessage) -> MaestroResult<()>;
}

/// Sender that only logs the message; actual delivery is not wired up
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, email: &EmailMessage) -> MaestroResult<()> {
        info!(
            to = ?email.to,
            subject = %email.subject,
            "Sending email"
        );
        Ok(())
    }
}

/// Compose the invitation email for a meeting
pub fn compose_meeting_email(meeting: &Meeting) -> EmailMessage {
    let date = format_long_date(meeting.date);

    let body = format!(
        "<h2>Meeting Details</h2>\n\
         <p><strong>Title:</strong> {}</p>\n\
         <p><strong>Date:</strong> {}</p>\n\
         <p><strong>Time:</strong> {}</p>\n\
         <p><strong>Description:</strong> {}</p>\n\
         <p>Please be on time and prepared for the meeting.</p>\n",
        escape_html(&meeting.title),
        date,
        escape_html(&meeting.time),
        escape_html(&meeting.description),
    );

    EmailMessage {
        to: meeting.participants.clone(),
        subject: format!("Meeting: {} - {}", meeting.title, date),
        body,
    }
}
