use crate::components::meeting_form::{ValidationErrors, MIN_TITLE_CHARS};
use crate::utils::validation::is_valid_email;
use rust_i18n::t;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted meeting durations in minutes
pub const DURATION_RANGE: RangeInclusive<u32> = 15..=120;

/// Progress line reported with every suggestion
pub const PROGRESS_SUMMARY: &str =
    "Implemented AI flow to suggest optimal meeting times based on attendee availability.";

/// An attendee and their availability in their own words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    /// Free text, may be empty
    #[serde(default)]
    pub availability: String,
}

/// What the user wants to schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub attendees: Vec<Attendee>,
    /// Minutes
    pub meeting_duration: u32,
    pub required_by: String,
    pub earliest_start: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl SuggestionRequest {
    /// Check the request before anything is sent to the model
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().chars().count() < MIN_TITLE_CHARS {
            errors.push("title", t!("form.title_too_short", min = MIN_TITLE_CHARS));
        }
        if !DURATION_RANGE.contains(&self.meeting_duration) {
            errors.push(
                "meetingDuration",
                t!(
                    "suggest.duration_out_of_range",
                    min = DURATION_RANGE.start(),
                    max = DURATION_RANGE.end()
                ),
            );
        }
        if self.attendees.is_empty() {
            errors.push("attendees", t!("suggest.attendees_required"));
        }
        if self
            .attendees
            .iter()
            .any(|a| !is_valid_email(a.email.trim()))
        {
            errors.push("attendees", t!("form.invalid_email"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// One candidate time window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedTime {
    /// ISO 8601 start
    pub start_time: String,
    /// ISO 8601 end
    pub end_time: String,
    /// Emails of the attendees free in this window
    pub attendees_available: Vec<String>,
}

/// What the model is asked to return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSuggestion {
    pub suggested_times: Vec<SuggestedTime>,
    pub reasoning: String,
    /// Ignored; the flow reports its own progress line
    #[serde(default, skip_serializing)]
    #[schemars(skip)]
    pub progress: Option<String>,
}

/// Validated result handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub suggested_times: Vec<SuggestedTime>,
    pub reasoning: String,
    pub progress: String,
}
