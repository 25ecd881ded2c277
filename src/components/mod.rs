// Export components
pub mod clipboard;
pub mod email;
pub mod meeting_form;
pub mod meeting_store;
pub mod notice;
pub mod schedule_view;
pub mod slots;
pub mod suggest;

// Re-export the handles the web layer wires together
pub use meeting_store::MeetingStoreHandle;
pub use slots::SlotPicker;
pub use suggest::SuggestionFlow;
