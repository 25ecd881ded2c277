mod day;
mod week;

pub use day::{send_meeting_email, DayView, MeetingSummary};
pub use week::WeekView;
