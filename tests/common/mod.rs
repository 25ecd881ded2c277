#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use meetingmaestro::components::clipboard::Clipboard;
use meetingmaestro::components::email::{EmailMessage, EmailSender};
use meetingmaestro::components::meeting_store::{Meeting, MeetingStorage};
use meetingmaestro::components::suggest::CompletionService;
use meetingmaestro::error::{
    clipboard_error, completion_error, email_error, storage_error, MaestroResult,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn meeting(title: &str, date: NaiveDate, time: &str, participants: &[&str]) -> Meeting {
    Meeting {
        id: Uuid::new_v4(),
        title: title.to_string(),
        date,
        time: time.to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        description: String::new(),
    }
}

/// Clipboard that always refuses, like a browser without permission
pub struct DeniedClipboard;

#[async_trait]
impl Clipboard for DeniedClipboard {
    async fn write_text(&self, _text: &str) -> MaestroResult<()> {
        Err(clipboard_error("permission denied"))
    }
}

/// Email sender that records every message
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: bool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(&self, email: &EmailMessage) -> MaestroResult<()> {
        self.sent.lock().await.push(email.clone());
        if self.fail {
            return Err(email_error("smtp unavailable"));
        }
        Ok(())
    }
}

/// Completion service returning a canned answer
pub struct CannedCompletion {
    answer: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedCompletion {
    pub fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl CompletionService for CannedCompletion {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn complete(&self, _preamble: &str, prompt: &str) -> MaestroResult<String> {
        self.prompts.lock().await.push(prompt.to_string());
        self.answer
            .clone()
            .ok_or_else(|| completion_error("service unavailable"))
    }
}

/// Storage that cannot be reached
pub struct UnreachableStorage;

#[async_trait]
impl MeetingStorage for UnreachableStorage {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn read(&self) -> MaestroResult<Option<String>> {
        Err(storage_error("connection refused"))
    }

    async fn write(&self, _blob: &str) -> MaestroResult<()> {
        Err(storage_error("connection refused"))
    }
}
