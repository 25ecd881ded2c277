use super::error::ApiError;
use super::AppState;
use crate::components::clipboard::BufferClipboard;
use crate::components::meeting_form::MeetingDraft;
use crate::components::meeting_store::Meeting;
use crate::components::notice::Notice;
use crate::components::schedule_view::{DayView, MeetingSummary, WeekView};
use crate::components::slots::SlotState;
use crate::components::suggest::{SuggestionRequest, SuggestionResponse};
use crate::error::{completion_error, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rust_i18n::t;
use serde::Serialize;
use uuid::Uuid;

/// A day of meetings as returned by the API
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub heading: String,
    pub meetings: Vec<MeetingSummary>,
}

impl From<&DayView> for DayResponse {
    fn from(view: &DayView) -> Self {
        Self {
            date: view.date,
            heading: view.heading(),
            meetings: view.summaries(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DayResponse>,
}

#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub meeting: Meeting,
    pub notice: Notice,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub notice: Notice,
    /// Text for the browser to put on the clipboard
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct NoticeResponse {
    pub notice: Notice,
}

/// Health check
pub async fn health_handler() -> &'static str {
    "OK"
}

/// All stored meetings
pub async fn list_meetings(State(state): State<AppState>) -> Result<Json<Vec<Meeting>>, ApiError> {
    Ok(Json(state.store.load_all().await?))
}

/// Dates that have at least one meeting
pub async fn meeting_dates(
    State(state): State<AppState>,
) -> Result<Json<Vec<NaiveDate>>, ApiError> {
    Ok(Json(state.store.meeting_dates().await?))
}

pub async fn get_meeting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Meeting>, ApiError> {
    state
        .store
        .find(id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::NotFound(id.to_string()).into())
}

pub async fn delete_meeting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NoticeResponse>, ApiError> {
    if !state.store.delete(id).await? {
        return Err(Error::NotFound(id.to_string()).into());
    }
    Ok(Json(NoticeResponse {
        notice: Notice::success(
            t!("notice.meeting_deleted_title"),
            t!("notice.meeting_deleted_description"),
        ),
    }))
}

/// Remove every stored meeting
pub async fn clear_meetings(
    State(state): State<AppState>,
) -> Result<Json<NoticeResponse>, ApiError> {
    state.store.clear().await?;
    Ok(Json(NoticeResponse {
        notice: Notice::success(t!("notice.cleared_title"), t!("notice.cleared_description")),
    }))
}

pub async fn day_view(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DayResponse>, ApiError> {
    let view = DayView::build(date, state.store.meetings_for_date(date).await?);
    Ok(Json(DayResponse::from(&view)))
}

pub async fn week_view(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<WeekResponse>, ApiError> {
    let meetings = state.store.load_all().await?;
    let week = WeekView::build(date, &meetings)
        .ok_or_else(|| Error::NotFound(format!("Week of {} is outside the calendar", date)))?;
    Ok(Json(WeekResponse {
        start: week.start,
        end: week.end,
        days: week.days.iter().map(DayResponse::from).collect(),
    }))
}

/// Slots of a date with taken ones marked unavailable
pub async fn list_slots(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<SlotState>>, ApiError> {
    Ok(Json(state.picker.slots_for(date).await?))
}

/// Pick a slot, which saves the draft as a meeting
pub async fn select_slot(
    State(state): State<AppState>,
    Path((date, time)): Path<(NaiveDate, String)>,
    Json(draft): Json<MeetingDraft>,
) -> Result<(StatusCode, Json<SavedResponse>), ApiError> {
    let meeting = state.picker.select(date, &time, draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(SavedResponse {
            meeting,
            notice: Notice::success(
                t!("notice.meeting_added_title"),
                t!("notice.meeting_added_description"),
            ),
        }),
    ))
}

/// Copy the day's meetings; the text is handed back for the browser clipboard
pub async fn copy_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<CopyResponse>, ApiError> {
    let view = DayView::build(date, state.store.meetings_for_date(date).await?);
    let clipboard = BufferClipboard::new();
    let notice = view.copy_all(&clipboard).await;
    Ok(Json(CopyResponse {
        notice,
        text: clipboard.contents().await,
    }))
}

/// Email every meeting of the day to its participants
pub async fn email_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<EmailResponse>, ApiError> {
    let view = DayView::build(date, state.store.meetings_for_date(date).await?);
    let notices = view.send_emails(state.email.as_ref()).await;
    Ok(Json(EmailResponse { notices }))
}

/// Ask the completion service for meeting times
pub async fn suggest_times(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let flow = state.suggestions.as_ref().ok_or_else(|| {
        ApiError::with_status(
            StatusCode::SERVICE_UNAVAILABLE,
            completion_error("Time suggestions are not configured"),
        )
    })?;
    Ok(Json(flow.suggest(&request).await?))
}
