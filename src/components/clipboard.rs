use crate::error::MaestroResult;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Destination for copied text
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents
    async fn write_text(&self, text: &str) -> MaestroResult<()>;
}

/// Clipboard that keeps the copied text in memory.
///
/// The web interface hands the buffered text back to the browser, which
/// owns the real system clipboard.
#[derive(Debug, Default)]
pub struct BufferClipboard {
    contents: Mutex<Option<String>>,
}

impl BufferClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written last, if any
    pub async fn contents(&self) -> Option<String> {
        self.contents.lock().await.clone()
    }
}

#[async_trait]
impl Clipboard for BufferClipboard {
    async fn write_text(&self, text: &str) -> MaestroResult<()> {
        *self.contents.lock().await = Some(text.to_string());
        Ok(())
    }
}
