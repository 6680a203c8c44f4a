//! Client library for the Pipe Network points API.
//!
//! The pieces compose bottom-up: the [`api::ApiClient`] discovers the
//! active base URL and issues login and points requests, the
//! [`auth::SessionStore`] persists the bearer token, and [`app::App`]
//! runs the two-state session machine against a [`ui::Ui`] front end.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod ui;
