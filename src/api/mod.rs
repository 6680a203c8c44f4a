//! REST API client module for the Pipe Network points service.
//!
//! This module provides the `ApiClient` for endpoint discovery, login,
//! and authenticated points requests.
//!
//! The API uses bearer token authentication obtained through the
//! login endpoint at the discovered base URL.

pub mod client;
pub mod error;
pub mod resolver;

pub use client::ApiClient;
pub use error::{ApiError, RetryPolicy};
pub use resolver::{EndpointResolver, Endpoints};
