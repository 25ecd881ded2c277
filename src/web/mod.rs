pub mod error;
pub mod handlers;
pub mod pages;

use crate::components::email::EmailSender;
use crate::components::{MeetingStoreHandle, SlotPicker, SuggestionFlow};
use axum::routing::{get, post};
use axum::Router;
use chrono_tz::Tz;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use handlers::{
    clear_meetings, copy_day, day_view, delete_meeting, email_day, get_meeting, health_handler,
    list_meetings, list_slots, meeting_dates, select_slot, suggest_times, week_view,
};
use pages::{day_page, index_handler, submit_slot};

/// Shared state of the web interface
#[derive(Clone)]
pub struct AppState {
    pub store: MeetingStoreHandle,
    pub picker: SlotPicker,
    pub email: Arc<dyn EmailSender>,
    /// None when no completion service is configured
    pub suggestions: Option<SuggestionFlow>,
    /// Addresses offered by the meeting form
    pub participant_directory: Vec<String>,
    /// Timezone deciding what "today" is
    pub tz: Tz,
}

/// Build the router with every page and API route
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/meeting/{date}", get(day_page).post(submit_slot))
        .route("/health", get(health_handler))
        .route("/api/meetings", get(list_meetings).delete(clear_meetings))
        .route("/api/meetings/dates", get(meeting_dates))
        .route("/api/meetings/{id}", get(get_meeting).delete(delete_meeting))
        .route("/api/days/{date}", get(day_view))
        .route("/api/weeks/{date}", get(week_view))
        .route("/api/days/{date}/slots", get(list_slots))
        .route("/api/days/{date}/slots/{time}", post(select_slot))
        .route("/api/days/{date}/copy", post(copy_day))
        .route("/api/days/{date}/email", post(email_day))
        .route("/api/suggestions", post(suggest_times))
        // Serve static files
        .nest_service("/assets", ServeDir::new("assets"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
