mod client;
mod flow;
pub mod models;
mod prompt;

#[cfg(feature = "gemini")]
pub use client::GeminiCompletion;
pub use client::CompletionService;
pub use flow::{parse_model_output, SuggestionFlow};
pub use models::{
    Attendee, ModelSuggestion, SuggestedTime, SuggestionRequest, SuggestionResponse,
    PROGRESS_SUMMARY,
};
pub use prompt::{render_preamble, render_prompt};
