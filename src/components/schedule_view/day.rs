use crate::components::clipboard::Clipboard;
use crate::components::email::{compose_meeting_email, EmailSender};
use crate::components::meeting_store::Meeting;
use crate::components::notice::Notice;
use crate::utils::time::{format_long_date, parse_slot_time};
use crate::utils::validation::short_name;
use chrono::NaiveDate;
use rust_i18n::t;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::error;
use uuid::Uuid;

/// A meeting as shown in the day view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingSummary {
    pub id: Uuid,
    pub title: String,
    pub time: String,
    /// Local parts of the participant addresses
    pub attendees: Vec<String>,
    pub participants: Vec<String>,
    pub description: String,
}

impl From<&Meeting> for MeetingSummary {
    fn from(meeting: &Meeting) -> Self {
        Self {
            id: meeting.id,
            title: meeting.title.clone(),
            time: meeting.time.clone(),
            attendees: meeting
                .participants
                .iter()
                .map(|p| short_name(p).to_string())
                .collect(),
            participants: meeting.participants.clone(),
            description: meeting.description.clone(),
        }
    }
}

/// Meetings of one date, sorted by time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date: NaiveDate,
    pub meetings: Vec<Meeting>,
}

impl DayView {
    /// Filter a collection to one date and sort it by time.
    ///
    /// The sort is stable; meetings whose time does not parse go last.
    pub fn build(date: NaiveDate, meetings: impl IntoIterator<Item = Meeting>) -> Self {
        let mut meetings: Vec<Meeting> = meetings.into_iter().filter(|m| m.date == date).collect();
        meetings.sort_by_key(|m| match parse_slot_time(&m.time) {
            Some(time) => (0, Some(time)),
            None => (1, None),
        });
        Self { date, meetings }
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }

    /// Heading such as "Meetings for June 3rd, 2024"
    pub fn heading(&self) -> String {
        t!("view.heading", date = format_long_date(self.date)).into_owned()
    }

    /// Rows for rendering
    pub fn summaries(&self) -> Vec<MeetingSummary> {
        self.meetings.iter().map(MeetingSummary::from).collect()
    }

    /// Human-readable text block of every meeting of the day
    pub fn clipboard_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut text = format!("{}:\n\n", self.heading());
        for (index, meeting) in self.meetings.iter().enumerate() {
            let _ = writeln!(text, "Meeting {}:", index + 1);
            let _ = writeln!(text, "Title: {}", meeting.title);
            let _ = writeln!(text, "Date: {}", format_long_date(meeting.date));
            let _ = writeln!(text, "Time: {}", meeting.time);
            let _ = writeln!(text, "Participants: {}", meeting.participants.join(", "));
            let _ = writeln!(text, "Description: {}\n", meeting.description);
        }
        Some(text)
    }

    /// Copy every meeting of the day to the clipboard
    pub async fn copy_all(&self, clipboard: &dyn Clipboard) -> Notice {
        let Some(text) = self.clipboard_text() else {
            return Notice::failure(
                t!("notice.no_meetings_title"),
                t!("notice.no_meetings_copy_description"),
            );
        };

        match clipboard.write_text(&text).await {
            Ok(()) => Notice::success(
                t!("notice.copied_title"),
                t!("notice.copied_description"),
            ),
            Err(e) => {
                error!("Failed to copy meetings to clipboard: {}", e);
                Notice::failure(
                    t!("notice.copy_failed_title"),
                    t!("notice.copy_failed_description"),
                )
            }
        }
    }

    /// Email every meeting of the day to its participants, one after another
    pub async fn send_emails(&self, sender: &dyn EmailSender) -> Vec<Notice> {
        if self.is_empty() {
            return vec![Notice::failure(
                t!("notice.no_meetings_title"),
                t!("notice.no_meetings_email_description"),
            )];
        }

        let mut notices = Vec::with_capacity(self.meetings.len());
        for meeting in &self.meetings {
            notices.push(send_meeting_email(meeting, sender).await);
        }
        notices
    }
}

/// Email one meeting to its participants
pub async fn send_meeting_email(meeting: &Meeting, sender: &dyn EmailSender) -> Notice {
    if meeting.participants.is_empty() {
        return Notice::failure(
            t!("notice.no_participants_title"),
            t!("notice.no_participants_description"),
        );
    }

    let email = compose_meeting_email(meeting);
    match sender.send(&email).await {
        Ok(()) => Notice::success(
            t!("notice.email_sent_title"),
            t!("notice.email_sent_description"),
        ),
        Err(e) => {
            error!("Failed to send email for '{}': {}", meeting.title, e);
            Notice::failure(
                t!("notice.email_failed_title"),
                t!("notice.email_failed_description"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(title: &str, day: u32, time: &str) -> Meeting {
        Meeting {
            id: Uuid::new_v4(),
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: time.to_string(),
            participants: vec!["alice@x.com".to_string(), "bob@x.com".to_string()],
            description: String::new(),
        }
    }

    #[test]
    fn test_build_filters_and_sorts() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let view = DayView::build(
            date,
            vec![
                meeting("Review", 3, "14:00"),
                meeting("Other day", 4, "08:00"),
                meeting("Broken", 3, "noon"),
                meeting("Early", 3, "9:00"),
            ],
        );

        let titles: Vec<&str> = view.meetings.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Early", "Review", "Broken"]);
    }

    #[test]
    fn test_summaries_use_short_names() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let view = DayView::build(date, vec![meeting("Standup", 3, "09:00")]);
        let summaries = view.summaries();
        assert_eq!(summaries[0].attendees, vec!["alice", "bob"]);
        assert_eq!(view.heading(), "Meetings for June 3rd, 2024");
    }

    #[test]
    fn test_clipboard_text() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let mut standup = meeting("Standup", 3, "09:00");
        standup.description = "Daily sync".to_string();
        let view = DayView::build(date, vec![standup]);

        let text = view.clipboard_text().unwrap();
        assert!(text.starts_with("Meetings for June 3rd, 2024:\n\nMeeting 1:\n"));
        assert!(text.contains("Title: Standup\n"));
        assert!(text.contains("Time: 09:00\n"));
        assert!(text.contains("Participants: alice@x.com, bob@x.com\n"));
        assert!(text.ends_with("Description: Daily sync\n\n"));

        assert!(DayView::build(date, Vec::new()).clipboard_text().is_none());
    }
}
