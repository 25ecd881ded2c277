use super::client::CompletionService;
use super::models::{ModelSuggestion, SuggestionRequest, SuggestionResponse, PROGRESS_SUMMARY};
use super::prompt::{render_preamble, render_prompt};
use crate::error::{schema_error, Error, MaestroResult};
use crate::utils::time::parse_iso8601;
use crate::utils::validation::is_valid_email;
use std::sync::Arc;
use tracing::{error, info};

/// Asks the completion service for meeting times and validates the answer.
///
/// Stateless between calls; no retries.
#[derive(Clone)]
pub struct SuggestionFlow {
    service: Arc<dyn CompletionService>,
}

impl SuggestionFlow {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// Name of the completion backend
    pub fn backend_name(&self) -> &'static str {
        self.service.name()
    }

    /// Suggest meeting times for a request
    pub async fn suggest(&self, request: &SuggestionRequest) -> MaestroResult<SuggestionResponse> {
        request.validate().map_err(Error::Validation)?;

        let preamble = render_preamble()?;
        let prompt = render_prompt(request);

        let raw = self.service.complete(&preamble, &prompt).await?;
        info!(
            "Received {} bytes from {}",
            raw.len(),
            self.service.name()
        );

        let suggestion = parse_model_output(&raw).inspect_err(|e| {
            error!("Rejected completion output: {}", e);
        })?;

        Ok(SuggestionResponse {
            suggested_times: suggestion.suggested_times,
            reasoning: suggestion.reasoning,
            progress: PROGRESS_SUMMARY.to_string(),
        })
    }
}

/// Slice the outermost JSON object out of a model answer
fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (start < end).then(|| &response[start..=end])
}

/// Parse and check a model answer against the output schema
pub fn parse_model_output(response: &str) -> MaestroResult<ModelSuggestion> {
    let json = extract_json_object(response)
        .ok_or_else(|| schema_error("no JSON object in the response"))?;

    let suggestion: ModelSuggestion = serde_json::from_str(json)
        .map_err(|e| schema_error(&format!("unexpected shape: {}", e)))?;

    for (index, slot) in suggestion.suggested_times.iter().enumerate() {
        let start = parse_iso8601(&slot.start_time).ok_or_else(|| {
            schema_error(&format!("suggestion {}: startTime is not ISO 8601", index + 1))
        })?;
        let end = parse_iso8601(&slot.end_time).ok_or_else(|| {
            schema_error(&format!("suggestion {}: endTime is not ISO 8601", index + 1))
        })?;
        if end < start {
            return Err(schema_error(&format!(
                "suggestion {}: endTime is before startTime",
                index + 1
            )));
        }
        if let Some(email) = slot
            .attendees_available
            .iter()
            .find(|e| !is_valid_email(e))
        {
            return Err(schema_error(&format!(
                "suggestion {}: '{}' is not an email address",
                index + 1,
                email
            )));
        }
    }

    Ok(suggestion)
}
