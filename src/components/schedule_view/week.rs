use super::day::DayView;
use crate::components::meeting_store::Meeting;
use crate::utils::time::week_bounds;
use chrono::NaiveDate;

/// Monday to Sunday around a selected date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// One day view per day, Monday first
    pub days: Vec<DayView>,
}

impl WeekView {
    /// Build the week containing `date`.
    ///
    /// None when the week reaches past the first or last representable date.
    pub fn build(date: NaiveDate, meetings: &[Meeting]) -> Option<Self> {
        let (start, end) = week_bounds(date)?;
        let days = start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| DayView::build(day, meetings.iter().cloned()))
            .collect();

        Some(Self { start, end, days })
    }

    /// Number of meetings in the whole week
    pub fn meeting_count(&self) -> usize {
        self.days.iter().map(|d| d.meetings.len()).sum()
    }
}
