mod common;

use common::CannedCompletion;
use meetingmaestro::components::suggest::{
    Attendee, SuggestionFlow, SuggestionRequest, PROGRESS_SUMMARY,
};
use meetingmaestro::error::Error;

fn request(attendees: Vec<Attendee>) -> SuggestionRequest {
    SuggestionRequest {
        attendees,
        meeting_duration: 30,
        required_by: "2024-06-07T17:00:00Z".to_string(),
        earliest_start: "2024-06-03T09:00:00Z".to_string(),
        title: "Planning".to_string(),
        description: "Quarter planning".to_string(),
    }
}

fn attendee(email: &str, availability: &str) -> Attendee {
    Attendee {
        email: email.to_string(),
        availability: availability.to_string(),
    }
}

const GOOD_ANSWER: &str = r#"Here you go:
```json
{
  "suggestedTimes": [
    {"startTime": "2024-06-03T09:00:00Z", "endTime": "2024-06-03T09:30:00Z", "attendeesAvailable": ["a@x.com"]}
  ],
  "reasoning": "Earliest slot everyone listed.",
  "progress": "model progress text"
}
```"#;

#[tokio::test]
async fn test_valid_answer_passes_through_with_fixed_progress() {
    let service = CannedCompletion::answering(GOOD_ANSWER);
    let flow = SuggestionFlow::new(service.clone());

    let response = flow
        .suggest(&request(vec![attendee("a@x.com", "Mornings")]))
        .await
        .unwrap();

    assert_eq!(response.suggested_times.len(), 1);
    assert_eq!(response.suggested_times[0].attendees_available, vec!["a@x.com"]);
    assert_eq!(response.reasoning, "Earliest slot everyone listed.");
    assert_eq!(response.progress, PROGRESS_SUMMARY);

    let prompts = service.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- Email: a@x.com, Availability: Mornings"));
}

#[tokio::test]
async fn test_empty_availability_still_yields_a_checked_answer() {
    let service = CannedCompletion::answering(GOOD_ANSWER);
    let flow = SuggestionFlow::new(service.clone());

    let result = flow.suggest(&request(vec![attendee("a@x.com", "")])).await;
    assert!(result.is_ok());
    assert!(service.prompts().await[0].contains("- Email: a@x.com, Availability: \n"));

    let flow = SuggestionFlow::new(CannedCompletion::answering("I cannot help with that."));
    let result = flow.suggest(&request(vec![attendee("a@x.com", "")])).await;
    assert!(matches!(result, Err(Error::Schema(_))));
}

#[tokio::test]
async fn test_non_conforming_answer_is_an_error() {
    let answer = r#"{"suggestedTimes": [{"startTime": "tomorrow", "endTime": "later", "attendeesAvailable": []}], "reasoning": "vague"}"#;
    let flow = SuggestionFlow::new(CannedCompletion::answering(answer));

    let result = flow.suggest(&request(vec![attendee("a@x.com", "any")])).await;
    assert!(matches!(result, Err(Error::Schema(_))));
}

#[tokio::test]
async fn test_service_failure_is_reported() {
    let flow = SuggestionFlow::new(CannedCompletion::failing());
    let result = flow.suggest(&request(vec![attendee("a@x.com", "any")])).await;
    assert!(matches!(result, Err(Error::Completion(_))));
}

#[tokio::test]
async fn test_invalid_request_never_reaches_the_service() {
    let service = CannedCompletion::answering(GOOD_ANSWER);
    let flow = SuggestionFlow::new(service.clone());

    let mut req = request(Vec::new());
    req.meeting_duration = 200;
    let result = flow.suggest(&req).await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(service.prompts().await.is_empty());
}
