use super::models::{ModelSuggestion, SuggestionRequest};
use crate::error::MaestroResult;
use schemars::schema_for;
use std::fmt::Write as _;

const INSTRUCTIONS: &str = "You are a meeting scheduling assistant. Given the following attendees, their availabilities, meeting title, description, and meeting duration, suggest some possible meeting times that work for most of the attendees.  Your suggestions should be as close to the earliestStart as possible, but absolutely must happen before the requiredBy date.  Explain the reasoning for each time selected.";

const OUTPUT_FORMAT: &str = "Output in JSON format, with startTime and endTime in ISO 8601 format.  List the attendee emails that can attend during the suggested time in the attendeesAvailable field.";

/// Render the user prompt for a request.
///
/// User text is inserted in a single pass, so braces in a title or
/// description are kept as written.
pub fn render_prompt(request: &SuggestionRequest) -> String {
    let mut attendees = String::new();
    for attendee in &request.attendees {
        let _ = writeln!(
            attendees,
            "- Email: {}, Availability: {}",
            attendee.email, attendee.availability
        );
    }

    format!(
        "{INSTRUCTIONS}\n\n\
         Meeting title: {title}\n\
         Meeting description: {description}\n\
         Meeting duration: {duration} minutes\n\
         Earliest start time: {earliest_start}\n\
         Required by time: {required_by}\n\n\
         Attendees:\n\
         {attendees}\
         {OUTPUT_FORMAT}",
        title = request.title,
        description = request.description,
        duration = request.meeting_duration,
        earliest_start = request.earliest_start,
        required_by = request.required_by,
    )
}

/// System preamble carrying the JSON Schema the answer must follow
pub fn render_preamble() -> MaestroResult<String> {
    let schema = serde_json::to_string_pretty(&schema_for!(ModelSuggestion))?;
    Ok(format!(
        "You suggest meeting times. Respond with a single JSON object and nothing else. \
         The object must match this JSON Schema:\n{}",
        schema
    ))
}
