//! Request handler module
//!
//! Routing dispatch plus the note, upload-form and API-docs handlers.

pub mod docs;
pub mod form;
pub mod notes;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
