use super::models::Meeting;
use super::store::MeetingStore;
use crate::error::{storage_error, MaestroResult};
use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot};
use tracing::info;
use uuid::Uuid;

/// The meeting store actor that processes messages one at a time
pub struct MeetingStoreActor {
    store: MeetingStore,
    command_rx: mpsc::Receiver<StoreCommand>,
}

/// Commands that can be sent to the meeting store actor
pub enum StoreCommand {
    LoadAll(oneshot::Sender<Vec<Meeting>>),
    ForDate(NaiveDate, oneshot::Sender<Vec<Meeting>>),
    Dates(oneshot::Sender<Vec<NaiveDate>>),
    Find(Uuid, oneshot::Sender<Option<Meeting>>),
    Upsert(Meeting, oneshot::Sender<MaestroResult<Meeting>>),
    Book(Meeting, oneshot::Sender<MaestroResult<Meeting>>),
    Delete(Uuid, oneshot::Sender<MaestroResult<bool>>),
    Clear(oneshot::Sender<MaestroResult<()>>),
    Shutdown,
}

/// Handle for communicating with the meeting store actor
#[derive(Clone)]
pub struct MeetingStoreActorHandle {
    command_tx: mpsc::Sender<StoreCommand>,
}

impl MeetingStoreActorHandle {
    async fn request<T>(
        &self,
        make_command: impl FnOnce(oneshot::Sender<T>) -> StoreCommand,
    ) -> MaestroResult<T> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(make_command(response_tx))
            .await
            .map_err(|e| storage_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .await
            .map_err(|_| storage_error("Response channel closed"))
    }

    /// Get all stored meetings
    pub async fn load_all(&self) -> MaestroResult<Vec<Meeting>> {
        self.request(StoreCommand::LoadAll).await
    }

    /// Get the meetings stored for a date
    pub async fn meetings_for_date(&self, date: NaiveDate) -> MaestroResult<Vec<Meeting>> {
        self.request(|tx| StoreCommand::ForDate(date, tx)).await
    }

    /// Get the distinct dates that have meetings
    pub async fn meeting_dates(&self) -> MaestroResult<Vec<NaiveDate>> {
        self.request(StoreCommand::Dates).await
    }

    /// Find a meeting by id
    pub async fn find(&self, id: Uuid) -> MaestroResult<Option<Meeting>> {
        self.request(|tx| StoreCommand::Find(id, tx)).await
    }

    /// Insert or replace a meeting
    pub async fn upsert(&self, meeting: Meeting) -> MaestroResult<Meeting> {
        self.request(|tx| StoreCommand::Upsert(meeting, tx)).await?
    }

    /// Insert a meeting unless another meeting holds its slot
    pub async fn book(&self, meeting: Meeting) -> MaestroResult<Meeting> {
        self.request(|tx| StoreCommand::Book(meeting, tx)).await?
    }

    /// Delete a meeting by id
    pub async fn delete(&self, id: Uuid) -> MaestroResult<bool> {
        self.request(|tx| StoreCommand::Delete(id, tx)).await?
    }

    /// Remove all meetings
    pub async fn clear(&self) -> MaestroResult<()> {
        self.request(StoreCommand::Clear).await?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> MaestroResult<()> {
        let _ = self.command_tx.send(StoreCommand::Shutdown).await;
        Ok(())
    }
}

impl MeetingStoreActor {
    /// Create a new actor and return its handle
    pub fn new(store: MeetingStore) -> (Self, MeetingStoreActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self { store, command_rx };
        let handle = MeetingStoreActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!(
            "Meeting store actor started ({} storage)",
            self.store.backend_name()
        );

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                StoreCommand::LoadAll(response_tx) => {
                    let _ = response_tx.send(self.store.load_all().await);
                }
                StoreCommand::ForDate(date, response_tx) => {
                    let _ = response_tx.send(self.store.meetings_for_date(date).await);
                }
                StoreCommand::Dates(response_tx) => {
                    let _ = response_tx.send(self.store.meeting_dates().await);
                }
                StoreCommand::Find(id, response_tx) => {
                    let _ = response_tx.send(self.store.find(id).await);
                }
                StoreCommand::Upsert(meeting, response_tx) => {
                    let _ = response_tx.send(self.store.upsert(meeting).await);
                }
                StoreCommand::Book(meeting, response_tx) => {
                    let _ = response_tx.send(self.store.book(meeting).await);
                }
                StoreCommand::Delete(id, response_tx) => {
                    let _ = response_tx.send(self.store.delete(id).await);
                }
                StoreCommand::Clear(response_tx) => {
                    let _ = response_tx.send(self.store.clear().await);
                }
                StoreCommand::Shutdown => {
                    info!("Meeting store actor shutting down");
                    break;
                }
            }
        }

        info!("Meeting store actor shut down");
    }
}
