use super::actor::{MeetingStoreActor, MeetingStoreActorHandle};
use super::backend::MeetingStorage;
use super::models::Meeting;
use super::store::MeetingStore;
use crate::error::MaestroResult;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Handle for interacting with the meeting store actor.
///
/// All reads and writes go through one actor, so read-modify-write cycles
/// from concurrent requests never interleave inside this process.
#[derive(Clone)]
pub struct MeetingStoreHandle {
    actor_handle: MeetingStoreActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl MeetingStoreHandle {
    /// Create a new MeetingStoreHandle and spawn the actor
    pub fn new(store: MeetingStore) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = MeetingStoreActor::new(store);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Spawn an actor directly on top of a storage backend
    pub fn spawn(storage: Arc<dyn MeetingStorage>) -> Self {
        Self::new(MeetingStore::new(storage))
    }

    /// Get all stored meetings
    pub async fn load_all(&self) -> MaestroResult<Vec<Meeting>> {
        self.actor_handle.load_all().await
    }

    /// Get the meetings stored for a date
    pub async fn meetings_for_date(&self, date: NaiveDate) -> MaestroResult<Vec<Meeting>> {
        self.actor_handle.meetings_for_date(date).await
    }

    /// Get the distinct dates that have meetings
    pub async fn meeting_dates(&self) -> MaestroResult<Vec<NaiveDate>> {
        self.actor_handle.meeting_dates().await
    }

    /// Find a meeting by id
    pub async fn find(&self, id: Uuid) -> MaestroResult<Option<Meeting>> {
        self.actor_handle.find(id).await
    }

    /// Insert or replace a meeting
    pub async fn upsert(&self, meeting: Meeting) -> MaestroResult<Meeting> {
        self.actor_handle.upsert(meeting).await
    }

    /// Insert a meeting unless another meeting holds its slot.
    ///
    /// Check and write happen in one actor command, so concurrent bookings
    /// of a free slot cannot both succeed.
    pub async fn book(&self, meeting: Meeting) -> MaestroResult<Meeting> {
        self.actor_handle.book(meeting).await
    }

    /// Delete a meeting by id
    pub async fn delete(&self, id: Uuid) -> MaestroResult<bool> {
        self.actor_handle.delete(id).await
    }

    /// Remove all meetings
    pub async fn clear(&self) -> MaestroResult<()> {
        self.actor_handle.clear().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> MaestroResult<()> {
        self.actor_handle.shutdown().await
    }
}
