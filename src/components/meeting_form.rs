use crate::components::meeting_store::Meeting;
use crate::utils::validation::is_valid_email;
use chrono::NaiveDate;
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Minimum number of characters in a meeting title
pub const MIN_TITLE_CHARS: usize = 2;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All validation failures of one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Record a failure for a field
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the given field has at least one failure
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// In-progress meeting form values.
///
/// Date and time are not part of the draft: they come from the slot the
/// user picks, and picking a slot is what submits the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDraft {
    /// Set when editing an existing meeting
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl MeetingDraft {
    /// Pre-fill a draft from an existing meeting for editing
    pub fn from_meeting(meeting: &Meeting) -> Self {
        Self {
            id: Some(meeting.id),
            title: meeting.title.clone(),
            participants: meeting.participants.clone(),
            description: meeting.description.clone(),
        }
    }

    /// Replace participants from comma-separated text input
    pub fn set_participants_from_input(&mut self, input: &str) {
        self.participants = parse_participant_input(input);
    }

    /// Add a participant (drag and drop), ignoring duplicates
    pub fn add_participant(&mut self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() || self.participants.iter().any(|p| p == email) {
            return false;
        }
        self.participants.push(email.to_string());
        true
    }

    /// Remove all participants
    pub fn clear_participants(&mut self) {
        self.participants.clear();
    }

    /// Participants with empty entries filtered out
    pub fn filtered_participants(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate title and participants
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().chars().count() < MIN_TITLE_CHARS {
            errors.push(
                "title",
                t!("form.title_too_short", min = MIN_TITLE_CHARS).to_string(),
            );
        }

        let participants = self.filtered_participants();
        if participants.iter().any(|p| !is_valid_email(p)) {
            errors.push("participants", t!("form.invalid_email").to_string());
        }
        if participants.is_empty() {
            errors.push("participants", t!("form.participants_required").to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and turn the draft into a meeting for the chosen slot
    pub fn into_meeting(self, date: NaiveDate, time: &str) -> Result<Meeting, ValidationErrors> {
        self.validate()?;
        let participants = self.filtered_participants();

        Ok(Meeting {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            title: self.title.trim().to_string(),
            date,
            time: time.to_string(),
            participants,
            description: self.description,
        })
    }
}

/// Split comma-separated participant input into trimmed entries
pub fn parse_participant_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Which meeting, if any, the form should be pre-filled with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSelection {
    NoneFound,
    Selected(Meeting),
}

impl FormSelection {
    /// Resolve an explicitly selected meeting id against the day's meetings
    pub fn resolve(meetings: &[Meeting], selected: Option<Uuid>) -> Self {
        selected
            .and_then(|id| meetings.iter().find(|m| m.id == id))
            .map(|m| FormSelection::Selected(m.clone()))
            .unwrap_or(FormSelection::NoneFound)
    }

    /// Draft to show in the form
    pub fn draft(&self) -> MeetingDraft {
        match self {
            FormSelection::NoneFound => MeetingDraft::default(),
            FormSelection::Selected(meeting) => MeetingDraft::from_meeting(meeting),
        }
    }
}
