use super::error::ApiError;
use super::AppState;
use crate::components::meeting_form::{
    parse_participant_input, FormSelection, MeetingDraft, ValidationErrors,
};
use crate::components::notice::Notice;
use crate::components::schedule_view::{DayView, MeetingSummary};
use crate::components::slots::SlotState;
use crate::error::{other_error, Error, MaestroResult};
use crate::utils::time::{format_long_date, today_in};
use askama::Template;
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::NaiveDate;
use rust_i18n::t;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Query string of the day page
#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    /// Meeting to pre-fill the form with
    pub selected: Option<Uuid>,
    /// Set after a successful save
    pub saved: Option<bool>,
}

/// Body posted by the day page when a slot button is pressed
#[derive(Debug, Default, Deserialize)]
pub struct SlotForm {
    pub time: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    /// Comma-separated addresses
    #[serde(default)]
    pub participants: String,
    #[serde(default)]
    pub description: String,
}

impl SlotForm {
    /// Draft from the posted fields, without the meeting id
    fn draft(&self) -> MeetingDraft {
        MeetingDraft {
            id: None,
            title: self.title.clone(),
            participants: parse_participant_input(&self.participants),
            description: self.description.clone(),
        }
    }

    /// Id of the meeting being edited. A blank id means a new meeting.
    fn meeting_id(&self) -> Result<Option<Uuid>, ValidationErrors> {
        match self.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            None => Ok(None),
            Some(id) => Uuid::parse_str(id).map(Some).map_err(|_| {
                let mut errors = ValidationErrors::default();
                errors.push("id", t!("form.invalid_id"));
                errors
            }),
        }
    }
}

struct SlotRow {
    time: String,
    available: bool,
    occupant: String,
}

impl From<SlotState> for SlotRow {
    fn from(slot: SlotState) -> Self {
        Self {
            time: slot.time,
            available: slot.available,
            occupant: slot.occupant.unwrap_or_default(),
        }
    }
}

struct DateLink {
    href: String,
    label: String,
}

#[derive(Template)]
#[template(path = "day.html")]
struct DayPage {
    heading: String,
    date: String,
    long_date: String,
    /// Empty when the date has no predecessor
    previous_date: String,
    /// Empty when the date has no successor
    next_date: String,
    dates: Vec<DateLink>,
    slots: Vec<SlotRow>,
    meetings: Vec<MeetingSummary>,
    draft_id: String,
    draft_title: String,
    draft_participants: String,
    draft_description: String,
    directory: Vec<String>,
    has_notice: bool,
    notice_title: String,
    notice_description: String,
    notice_variant: String,
    suggestions_enabled: bool,
}

/// Send the browser to today's page
pub async fn index_handler(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format!("/meeting/{}", today_in(state.tz)))
}

/// The day page: slot picker, meeting form and the day's meetings
pub async fn day_page(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Query(query): Query<DayQuery>,
) -> Result<Html<String>, ApiError> {
    let day_meetings = state.store.meetings_for_date(date).await?;
    let draft = FormSelection::resolve(&day_meetings, query.selected).draft();
    let notice = query.saved.filter(|saved| *saved).map(|_| {
        Notice::success(
            t!("notice.meeting_added_title"),
            t!("notice.meeting_added_description"),
        )
    });

    Ok(Html(render_day(&state, date, &draft, notice).await?))
}

/// Form fallback for slot selection when scripts are off
pub async fn submit_slot(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Form(form): Form<SlotForm>,
) -> Result<Response, ApiError> {
    let mut draft = form.draft();
    let result = match form.meeting_id() {
        Ok(id) => {
            draft.id = id;
            state.picker.select(date, &form.time, draft.clone()).await
        }
        Err(errors) => Err(Error::Validation(errors)),
    };

    match result {
        Ok(meeting) => {
            info!("Saved '{}' from the day page", meeting.title);
            Ok(Redirect::to(&format!("/meeting/{}?saved=true", date)).into_response())
        }
        Err(e @ (Error::Validation(_) | Error::SlotUnavailable { .. } | Error::UnknownSlot(_))) => {
            let notice = Notice::from_error(&e);
            let html = render_day(&state, date, &draft, Some(notice)).await?;
            Ok((super::error::status_for(&e), Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn render_day(
    state: &AppState,
    date: NaiveDate,
    draft: &MeetingDraft,
    notice: Option<Notice>,
) -> MaestroResult<String> {
    let view = DayView::build(date, state.store.meetings_for_date(date).await?);
    let slots = state.picker.slots_for(date).await?;
    let dates = state.store.meeting_dates().await?;

    let (has_notice, notice_title, notice_description, notice_variant) = match notice {
        Some(notice) => {
            let variant = if notice.is_failure() { "destructive" } else { "default" };
            (true, notice.title, notice.description, variant.to_string())
        }
        None => (false, String::new(), String::new(), String::new()),
    };

    let page = DayPage {
        heading: view.heading(),
        date: date.to_string(),
        long_date: format_long_date(date),
        previous_date: date.pred_opt().map(|d| d.to_string()).unwrap_or_default(),
        next_date: date.succ_opt().map(|d| d.to_string()).unwrap_or_default(),
        dates: dates
            .into_iter()
            .map(|d| DateLink {
                href: format!("/meeting/{}", d),
                label: format_long_date(d),
            })
            .collect(),
        slots: slots.into_iter().map(SlotRow::from).collect(),
        meetings: view.summaries(),
        draft_id: draft.id.map(|id| id.to_string()).unwrap_or_default(),
        draft_title: draft.title.clone(),
        draft_participants: draft.participants.join(", "),
        draft_description: draft.description.clone(),
        directory: state.participant_directory.clone(),
        has_notice,
        notice_title,
        notice_description,
        notice_variant,
        suggestions_enabled: state.suggestions.is_some(),
    };

    page.render()
        .map_err(|e| other_error(&format!("Failed to render day page: {}", e)))
}
