//! Core domain types
//!
//! These types represent the client-side view of one backend agent job:
//! the session lifecycle, the execution-log feed, and the output documents
//! discovered by polling.

pub mod document;
pub mod job;
pub mod log;
