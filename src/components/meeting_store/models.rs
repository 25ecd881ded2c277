use crate::utils::time::{parse_slot_time, parse_stored_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled meeting occupying one (date, time) slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredMeeting")]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub participants: Vec<String>,
    pub description: String,
}

impl Meeting {
    /// Whether this meeting occupies the given slot
    pub fn occupies(&self, date: NaiveDate, time: &str) -> bool {
        if self.date != date {
            return false;
        }
        match (parse_slot_time(&self.time), parse_slot_time(time)) {
            (Some(own), Some(other)) => own == other,
            _ => self.time.trim() == time.trim(),
        }
    }

    /// Stable identifier for records written before meetings carried ids
    pub fn legacy_id(date: NaiveDate, time: &str) -> Uuid {
        let name = format!("{}T{}", date.format("%Y-%m-%d"), time.trim());
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
    }
}

/// On-disk shape of a meeting, tolerant of older records
#[derive(Debug, Deserialize)]
struct StoredMeeting {
    #[serde(default)]
    id: Option<Uuid>,
    title: String,
    date: String,
    time: String,
    #[serde(default)]
    participants: Vec<String>,
    #[serde(default)]
    description: String,
}

impl TryFrom<StoredMeeting> for Meeting {
    type Error = String;

    fn try_from(stored: StoredMeeting) -> Result<Self, Self::Error> {
        let date = parse_stored_date(&stored.date)
            .ok_or_else(|| format!("Invalid meeting date: {}", stored.date))?;
        let id = stored
            .id
            .unwrap_or_else(|| Meeting::legacy_id(date, &stored.time));

        Ok(Self {
            id,
            title: stored.title,
            date,
            time: stored.time,
            participants: stored
                .participants
                .into_iter()
                .filter(|p| !p.trim().is_empty())
                .collect(),
            description: stored.description,
        })
    }
}

/// The whole persisted meeting collection with its version counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCollection {
    pub version: u64,
    pub meetings: Vec<Meeting>,
}

/// Accepted layouts of the stored blob
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBlob {
    Versioned(MeetingCollection),
    Legacy(Vec<Meeting>),
}

impl MeetingCollection {
    /// Parse a stored blob, accepting the bare-array layout as version 0
    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<StoredBlob>(blob)? {
            StoredBlob::Versioned(collection) => Ok(collection),
            StoredBlob::Legacy(meetings) => Ok(Self {
                version: 0,
                meetings,
            }),
        }
    }

    /// Serialize the collection for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
