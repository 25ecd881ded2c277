use crate::error::MaestroResult;
use async_trait::async_trait;

/// External text-completion service
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Send one prompt with a system preamble and return the raw answer
    async fn complete(&self, preamble: &str, prompt: &str) -> MaestroResult<String>;
}

#[cfg(feature = "gemini")]
pub use gemini::GeminiCompletion;

#[cfg(feature = "gemini")]
mod gemini {
    use super::CompletionService;
    use crate::error::{completion_error, MaestroResult};
    use async_trait::async_trait;
    use rig::completion::{Chat, Message};
    use rig::providers::gemini::Client as GeminiClient;
    use tracing::info;

    /// Completion service backed by Google Gemini
    pub struct GeminiCompletion {
        client: GeminiClient,
        model: String,
    }

    impl GeminiCompletion {
        pub fn new(api_key: &str, model: impl Into<String>) -> Self {
            Self {
                client: GeminiClient::new(api_key),
                model: model.into(),
            }
        }
    }

    #[async_trait]
    impl CompletionService for GeminiCompletion {
        fn name(&self) -> &'static str {
            "gemini"
        }

        async fn complete(&self, preamble: &str, prompt: &str) -> MaestroResult<String> {
            info!("Requesting suggestions from Gemini model {}", self.model);

            let agent = self
                .client
                .agent(&self.model)
                .preamble(preamble)
                .temperature(0.2)
                .build();

            agent
                .chat(prompt.to_string(), Vec::<Message>::new())
                .await
                .map_err(|e| completion_error(&format!("Gemini request failed: {}", e)))
        }
    }
}
