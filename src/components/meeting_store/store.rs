use super::backend::MeetingStorage;
use super::models::{Meeting, MeetingCollection};
use crate::error::{Error, MaestroResult};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Read-modify-write access to the meeting collection.
///
/// Every write replaces the whole collection. The version counter stored
/// alongside the meetings is bumped on each save and checked by
/// [`MeetingStore::save_if_current`], so a writer working from an outdated
/// snapshot is rejected instead of silently discarding someone else's change.
#[derive(Clone)]
pub struct MeetingStore {
    storage: Arc<dyn MeetingStorage>,
}

impl MeetingStore {
    /// Create a store on top of a storage backend
    pub fn new(storage: Arc<dyn MeetingStorage>) -> Self {
        Self { storage }
    }

    /// Name of the underlying backend
    pub fn backend_name(&self) -> &'static str {
        self.storage.name()
    }

    /// Read the collection; malformed data counts as empty, read failures propagate
    async fn read_collection(&self) -> MaestroResult<MeetingCollection> {
        let Some(blob) = self.storage.read().await? else {
            return Ok(MeetingCollection::default());
        };

        match MeetingCollection::from_json(&blob) {
            Ok(collection) => Ok(collection),
            Err(e) => {
                error!("Failed to parse stored meetings, treating as empty: {}", e);
                Ok(MeetingCollection::default())
            }
        }
    }

    /// The stored collection including its version, empty on any failure
    pub async fn snapshot(&self) -> MeetingCollection {
        match self.read_collection().await {
            Ok(collection) => collection,
            Err(e) => {
                error!(
                    "Failed to read meetings from {} storage: {}",
                    self.storage.name(),
                    e
                );
                MeetingCollection::default()
            }
        }
    }

    /// All stored meetings, empty on missing or malformed data
    pub async fn load_all(&self) -> Vec<Meeting> {
        self.snapshot().await.meetings
    }

    /// Overwrite the whole collection, returning the new version
    pub async fn save_all(&self, meetings: Vec<Meeting>) -> MaestroResult<u64> {
        let current = self.read_collection().await?.version;
        self.write_collection(current + 1, meetings).await
    }

    /// Overwrite the collection only if it is still at `expected_version`
    pub async fn save_if_current(
        &self,
        expected_version: u64,
        meetings: Vec<Meeting>,
    ) -> MaestroResult<u64> {
        let actual = self.read_collection().await?.version;
        if actual != expected_version {
            return Err(Error::StaleWrite {
                expected: expected_version,
                actual,
            });
        }
        self.write_collection(expected_version + 1, meetings).await
    }

    async fn write_collection(&self, version: u64, meetings: Vec<Meeting>) -> MaestroResult<u64> {
        let collection = MeetingCollection { version, meetings };
        let blob = collection.to_json()?;
        self.storage.write(&blob).await?;
        Ok(version)
    }

    /// Insert a meeting, replacing whatever occupied its slot or carried its id
    pub async fn upsert(&self, meeting: Meeting) -> MaestroResult<Meeting> {
        let collection = self.read_collection().await?;
        self.store_into(collection, meeting).await
    }

    /// Insert a meeting only if no other meeting holds its slot.
    ///
    /// The occupancy check and the write work on the same snapshot, and the
    /// write is rejected if the collection moved on in between.
    pub async fn book(&self, meeting: Meeting) -> MaestroResult<Meeting> {
        let collection = self.read_collection().await?;

        if let Some(occupant) = collection
            .meetings
            .iter()
            .find(|m| m.id != meeting.id && m.occupies(meeting.date, &meeting.time))
        {
            warn!(
                "Slot {} on {} already held by '{}'",
                meeting.time, meeting.date, occupant.title
            );
            return Err(Error::SlotUnavailable {
                date: meeting.date,
                time: meeting.time,
            });
        }

        self.store_into(collection, meeting).await
    }

    async fn store_into(
        &self,
        collection: MeetingCollection,
        meeting: Meeting,
    ) -> MaestroResult<Meeting> {
        let mut meetings: Vec<Meeting> = collection
            .meetings
            .into_iter()
            .filter(|m| m.id != meeting.id && !m.occupies(meeting.date, &meeting.time))
            .collect();
        meetings.push(meeting.clone());

        let version = self.save_if_current(collection.version, meetings).await?;
        info!(
            "Stored meeting '{}' on {} at {} (version {})",
            meeting.title, meeting.date, meeting.time, version
        );
        Ok(meeting)
    }

    /// Meetings on the given date, in storage order
    pub async fn meetings_for_date(&self, date: NaiveDate) -> Vec<Meeting> {
        self.load_all()
            .await
            .into_iter()
            .filter(|m| m.date == date)
            .collect()
    }

    /// Distinct dates that have at least one meeting, ascending
    pub async fn meeting_dates(&self) -> Vec<NaiveDate> {
        self.load_all()
            .await
            .into_iter()
            .map(|m| m.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Look up a meeting by id
    pub async fn find(&self, id: Uuid) -> Option<Meeting> {
        self.load_all().await.into_iter().find(|m| m.id == id)
    }

    /// Delete a meeting by id, returning whether it existed
    pub async fn delete(&self, id: Uuid) -> MaestroResult<bool> {
        let collection = self.read_collection().await?;
        let before = collection.meetings.len();
        let meetings: Vec<Meeting> = collection
            .meetings
            .into_iter()
            .filter(|m| m.id != id)
            .collect();

        if meetings.len() == before {
            return Ok(false);
        }

        self.save_if_current(collection.version, meetings).await?;
        info!("Deleted meeting {}", id);
        Ok(true)
    }

    /// Remove every stored meeting
    pub async fn clear(&self) -> MaestroResult<()> {
        self.save_all(Vec::new()).await?;
        info!("Cleared all meetings");
        Ok(())
    }
}
