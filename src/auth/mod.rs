//! Session persistence module.
//!
//! This module provides:
//! - `SessionStore`: JSON-file-backed storage for the bearer token and
//!   the identity it was issued to
//!
//! Presence of a stored token is what distinguishes an authenticated
//! session from the anonymous state.

pub mod storage;

pub use storage::{SessionStore, StorageError};
