#![cfg(feature = "web-interface")]

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use common::{date, meeting, CannedCompletion, RecordingSender};
use meetingmaestro::components::meeting_store::{MeetingStoreHandle, MemoryStorage};
use meetingmaestro::components::slots::{SlotCatalogue, SlotPicker};
use meetingmaestro::components::suggest::SuggestionFlow;
use meetingmaestro::web::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(suggestions: Option<SuggestionFlow>) -> (Router, MeetingStoreHandle, Arc<RecordingSender>) {
    let store = MeetingStoreHandle::spawn(Arc::new(MemoryStorage::new()));
    let sender = Arc::new(RecordingSender::default());
    let state = AppState {
        store: store.clone(),
        picker: SlotPicker::new(SlotCatalogue::default(), store.clone()),
        email: sender.clone(),
        suggestions,
        participant_directory: vec!["student1@example.com".to_string()],
        tz: chrono_tz::UTC,
    };
    (router(state), store, sender)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn send_html(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn form_post(uri: &str, body: &'static str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = test_app(None);
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_select_slot_then_conflict() {
    let (app, _, _) = test_app(None);
    let draft = json!({"title": "Standup", "participants": ["a@x.com"], "description": ""});

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/days/2024-06-03/slots/09:00",
        Some(draft.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["meeting"]["time"], "09:00");
    assert_eq!(body["notice"]["variant"], "default");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/days/2024-06-03/slots/09:00",
        Some(json!({"title": "Other", "participants": ["b@x.com"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["notice"]["variant"], "destructive");

    let (status, slots) = send(&app, Method::GET, "/api/days/2024-06-03/slots", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slots[0]["time"], "09:00");
    assert_eq!(slots[0]["available"], false);
    assert_eq!(slots[1]["available"], true);
}

#[tokio::test]
async fn test_validation_errors_list_fields() {
    let (app, store, _) = test_app(None);
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/days/2024-06-03/slots/10:00",
        Some(json!({"title": "S", "participants": []})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"participants"));
    assert_eq!(body["fields"][0]["message"], "Title must be at least 2 characters.");
    assert_eq!(body["fields"][1]["message"], "At least one participant is required.");
    assert_eq!(body["notice"]["title"], "Please check the form");
    assert!(store.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_day_week_and_copy() {
    let (app, store, _) = test_app(None);
    let day = date(2024, 6, 3);
    store
        .upsert(meeting("Review", day, "10:00", &["b@x.com"]))
        .await
        .unwrap();
    store
        .upsert(meeting("Standup", day, "09:00", &["a@x.com"]))
        .await
        .unwrap();

    let (_, body) = send(&app, Method::GET, "/api/days/2024-06-03", None).await;
    assert_eq!(body["heading"], "Meetings for June 3rd, 2024");
    assert_eq!(body["meetings"][0]["title"], "Standup");
    assert_eq!(body["meetings"][0]["attendees"][0], "a");
    assert_eq!(body["meetings"][1]["title"], "Review");

    let (_, week) = send(&app, Method::GET, "/api/weeks/2024-06-05", None).await;
    assert_eq!(week["start"], "2024-06-03");
    assert_eq!(week["days"].as_array().unwrap().len(), 7);

    let (_, copied) = send(&app, Method::POST, "/api/days/2024-06-03/copy", None).await;
    assert_eq!(copied["notice"]["title"], "Meetings Copied!");
    assert!(copied["text"]
        .as_str()
        .unwrap()
        .contains("Meeting 2:\nTitle: Review"));

    let (_, empty) = send(&app, Method::POST, "/api/days/2024-06-04/copy", None).await;
    assert_eq!(empty["notice"]["variant"], "destructive");
    assert!(empty["text"].is_null());
}

#[tokio::test]
async fn test_email_day() {
    let (app, store, sender) = test_app(None);
    let day = date(2024, 6, 3);
    store
        .upsert(meeting("Standup", day, "09:00", &["a@x.com"]))
        .await
        .unwrap();

    let (status, body) = send(&app, Method::POST, "/api/days/2024-06-03/email", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notices"][0]["title"], "Email sent.");
    assert_eq!(sender.sent().await.len(), 1);
}

#[tokio::test]
async fn test_get_and_delete_meeting() {
    let (app, store, _) = test_app(None);
    let standup = meeting("Standup", date(2024, 6, 3), "09:00", &["a@x.com"]);
    store.upsert(standup.clone()).await.unwrap();

    let uri = format!("/api/meetings/{}", standup.id);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Standup");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, dates) = send(&app, Method::GET, "/api/meetings/dates", None).await;
    assert_eq!(dates, json!([]));
}

#[tokio::test]
async fn test_suggestions() {
    let (app, _, _) = test_app(None);
    let request = json!({
        "attendees": [{"email": "a@x.com", "availability": ""}],
        "meetingDuration": 30,
        "requiredBy": "2024-06-07T17:00:00Z",
        "earliestStart": "2024-06-03T09:00:00Z",
        "title": "Planning",
        "description": ""
    });

    let (status, _) = send(&app, Method::POST, "/api/suggestions", Some(request.clone())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let answer = r#"{"suggestedTimes": [], "reasoning": "No overlap found."}"#;
    let flow = SuggestionFlow::new(CannedCompletion::answering(answer));
    let (app, _, _) = test_app(Some(flow));
    let (status, body) = send(&app, Method::POST, "/api/suggestions", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reasoning"], "No overlap found.");
    assert_eq!(
        body["progress"],
        "Implemented AI flow to suggest optimal meeting times based on attendee availability."
    );
}

#[tokio::test]
async fn test_day_page_renders_slots() {
    let (app, store, _) = test_app(None);
    store
        .upsert(meeting("Standup", date(2024, 6, 3), "09:00", &["a@x.com"]))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::get("/meeting/2024-06-03")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Meetings for June 3rd, 2024"));
    assert!(html.contains("Standup"));
    assert!(html.contains("student1@example.com"));
    assert!(html.contains(r#"value="09:00" disabled"#));
}

#[tokio::test]
async fn test_form_post_redirects_on_success() {
    let (app, store, _) = test_app(None);
    let response = app
        .oneshot(
            Request::post("/meeting/2024-06-03")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "time=11%3A00&id=&title=Standup&participants=a%40x.com%2C+b%40x.com&description=",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let saved = store.load_all().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].participants, vec!["a@x.com", "b@x.com"]);
}

#[tokio::test]
async fn test_form_post_rerenders_invalid_draft() {
    let (app, store, _) = test_app(None);
    let (status, html) = send_html(
        &app,
        form_post(
            "/meeting/2024-06-03",
            "time=11%3A00&id=&title=S&participants=a%40x.com&description=Kickoff+notes",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Please check the form"));
    assert!(html.contains("Title must be at least 2 characters."));
    assert!(html.contains("Kickoff notes"));
    assert!(store.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_form_post_rejects_malformed_id() {
    let (app, store, _) = test_app(None);
    let (status, html) = send_html(
        &app,
        form_post(
            "/meeting/2024-06-03",
            "time=11%3A00&id=not-a-uuid&title=Standup&participants=a%40x.com&description=",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Meeting id is not valid."));
    assert!(store.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_form_post_into_taken_slot_keeps_the_occupant() {
    let (app, store, _) = test_app(None);
    let standup = meeting("Standup", date(2024, 6, 3), "11:00", &["a@x.com"]);
    store.upsert(standup.clone()).await.unwrap();

    let (status, html) = send_html(
        &app,
        form_post(
            "/meeting/2024-06-03",
            "time=11%3A00&title=Review&participants=b%40x.com",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(html.contains("Time slot unavailable"));
    assert_eq!(store.load_all().await.unwrap(), vec![standup]);
}

#[tokio::test]
async fn test_pages_at_the_ends_of_the_calendar() {
    let (app, _, _) = test_app(None);

    let uri = format!("/meeting/{}", NaiveDate::MAX);
    let (status, html) = send_html(&app, Request::get(uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Previous day"));
    assert!(!html.contains("Next day"));

    let uri = format!("/meeting/{}", NaiveDate::MIN);
    let (status, html) = send_html(&app, Request::get(uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("Previous day"));
    assert!(html.contains("Next day"));
}

#[tokio::test]
async fn test_week_past_the_last_date_is_not_found() {
    let (app, _, _) = test_app(None);

    let uri = format!("/api/weeks/{}", NaiveDate::MAX);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["notice"]["variant"], "destructive");

    let sunday = NaiveDate::MAX.pred_opt().unwrap();
    let (status, week) = send(&app, Method::GET, &format!("/api/weeks/{}", sunday), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(week["end"], sunday.to_string());
}
