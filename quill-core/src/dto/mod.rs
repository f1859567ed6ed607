//! Data transfer objects for the backend API
//!
//! Wire representations of the four backend endpoints the monitor consumes:
//! job submission, execution-log polling, directory listing, and file
//! content retrieval.

pub mod directory;
pub mod job;
pub mod log;
