use crate::components::meeting_form::MeetingDraft;
use crate::components::meeting_store::{Meeting, MeetingStoreHandle};
use crate::config::SlotSettings;
use crate::error::{config_error, Error, MaestroResult};
use crate::utils::time::{format_slot, parse_slot_time};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::{info, warn};

/// The fixed set of time slots offered for every date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalogue {
    times: Vec<NaiveTime>,
    allow_free_form: bool,
}

impl Default for SlotCatalogue {
    fn default() -> Self {
        Self::from_settings(&SlotSettings::default())
            .unwrap_or_else(|_| Self {
                times: Vec::new(),
                allow_free_form: true,
            })
    }
}

impl SlotCatalogue {
    /// Build the catalogue from slot settings
    pub fn from_settings(settings: &SlotSettings) -> MaestroResult<Self> {
        let first = NaiveTime::from_hms_opt(settings.first_hour, 0, 0)
            .ok_or_else(|| config_error("Invalid first slot hour"))?;
        match settings.last_slot_minutes() {
            Some(minutes) if minutes < 24 * 60 => {}
            _ => return Err(config_error("Slot catalogue must end before midnight")),
        }

        // The last slot starts before midnight, so every offset fits in a day
        let times = (0..settings.count)
            .map(|i| first + Duration::minutes(i64::from(i * settings.step_minutes)))
            .collect();

        Ok(Self {
            times,
            allow_free_form: settings.allow_free_form,
        })
    }

    /// Slot start times in order
    pub fn times(&self) -> &[NaiveTime] {
        &self.times
    }

    /// Slot labels such as "09:00"
    pub fn labels(&self) -> Vec<String> {
        self.times.iter().copied().map(format_slot).collect()
    }

    pub fn allows_free_form(&self) -> bool {
        self.allow_free_form
    }

    /// Normalize a requested time to "HH:MM", rejecting times that are not offered
    pub fn resolve(&self, time: &str) -> MaestroResult<String> {
        let parsed = parse_slot_time(time).ok_or_else(|| Error::UnknownSlot(time.to_string()))?;
        if self.allow_free_form || self.times.contains(&parsed) {
            Ok(format_slot(parsed))
        } else {
            Err(Error::UnknownSlot(time.to_string()))
        }
    }
}

/// One slot as presented in the picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotState {
    pub time: String,
    pub available: bool,
    /// Title of the meeting holding the slot
    pub occupant: Option<String>,
}

/// Every catalogue slot for a day, with occupied ones marked unavailable
pub fn slot_states(catalogue: &SlotCatalogue, day_meetings: &[Meeting]) -> Vec<SlotState> {
    catalogue
        .labels()
        .into_iter()
        .map(|time| {
            let occupant = day_meetings
                .iter()
                .find(|m| m.occupies(m.date, &time))
                .map(|m| m.title.clone());
            SlotState {
                available: occupant.is_none(),
                occupant,
                time,
            }
        })
        .collect()
}

/// Lists slots and commits meetings when a slot is picked
#[derive(Clone)]
pub struct SlotPicker {
    catalogue: SlotCatalogue,
    store: MeetingStoreHandle,
}

impl SlotPicker {
    /// Create a picker over a catalogue and a meeting store
    pub fn new(catalogue: SlotCatalogue, store: MeetingStoreHandle) -> Self {
        Self { catalogue, store }
    }

    pub fn catalogue(&self) -> &SlotCatalogue {
        &self.catalogue
    }

    /// Slots for a date, with taken ones disabled
    pub async fn slots_for(&self, date: NaiveDate) -> MaestroResult<Vec<SlotState>> {
        let meetings = self.store.meetings_for_date(date).await?;
        Ok(slot_states(&self.catalogue, &meetings))
    }

    /// Pick a slot: check it is free, validate the draft and book the meeting.
    ///
    /// Nothing is written when the slot is taken by another meeting or the
    /// draft is invalid. The booking re-checks the slot inside the store, so
    /// a competing booking that lands after the first check still loses.
    pub async fn select(
        &self,
        date: NaiveDate,
        time: &str,
        draft: MeetingDraft,
    ) -> MaestroResult<Meeting> {
        let time = self.catalogue.resolve(time)?;

        let day_meetings = self.store.meetings_for_date(date).await?;
        if let Some(occupant) = day_meetings.iter().find(|m| m.occupies(date, &time)) {
            if draft.id != Some(occupant.id) {
                warn!(
                    "Rejected slot {} on {}: taken by '{}'",
                    time, date, occupant.title
                );
                return Err(Error::SlotUnavailable { date, time });
            }
        }

        let meeting = draft.into_meeting(date, &time)?;
        let stored = self.store.book(meeting).await?;
        info!("Booked '{}' on {} at {}", stored.title, stored.date, stored.time);
        Ok(stored)
    }
}
