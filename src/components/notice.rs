use crate::error::Error;
use rust_i18n::t;
use serde::Serialize;

/// How a notice is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// A short user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    /// An informational notice
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    /// A notice reporting that an action did not happen
    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }

    /// Notice for an error that ended a user action
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::Validation(errors) => Notice::failure(
                t!("notice.validation_title"),
                errors
                    .errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| t!("notice.validation_description").to_string()),
            ),
            Error::SlotUnavailable { date, time } => Notice::failure(
                t!("notice.slot_taken_title"),
                t!("notice.slot_taken_description", time = time, date = date),
            ),
            Error::UnknownSlot(time) => Notice::failure(
                t!("notice.unknown_slot_title"),
                t!("notice.unknown_slot_description", time = time),
            ),
            Error::NotFound(_) => Notice::failure(
                t!("notice.not_found_title"),
                t!("notice.not_found_description"),
            ),
            Error::StaleWrite { .. } => Notice::failure(
                t!("notice.stale_title"),
                t!("notice.stale_description"),
            ),
            Error::Email(_) => Notice::failure(
                t!("notice.email_failed_title"),
                t!("notice.email_failed_description"),
            ),
            Error::Clipboard(_) => Notice::failure(
                t!("notice.copy_failed_title"),
                t!("notice.copy_failed_description"),
            ),
            Error::Completion(_) | Error::Schema(_) => Notice::failure(
                t!("notice.suggest_failed_title"),
                t!("notice.suggest_failed_description"),
            ),
            _ => Notice::failure(
                t!("notice.generic_title"),
                t!("notice.generic_description"),
            ),
        }
    }
}
