//! UI collaborator interface.
//!
//! The core never owns layout or rendering: it switches between the login
//! and dashboard views, writes the points value, and raises user-facing
//! notices. Front ends implement `Ui`; tests use a recording impl.

use std::fmt;

pub mod console;

pub use console::ConsoleUi;

/// User-facing messages raised by auth and points operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidCredentials,
    LoginFailed,
    NetworkError,
    UnexpectedError,
    PointsUnavailable,
    StorageError,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Notice::InvalidCredentials => {
                "Invalid credentials. Please check your email and password."
            }
            Notice::LoginFailed => "Login failed! Please try again.",
            Notice::NetworkError => {
                "Network error. Please check your connection and try again."
            }
            Notice::UnexpectedError => "An unexpected error occurred. Please try again later.",
            Notice::PointsUnavailable => "Points could not be fetched. Please try again later.",
            Notice::StorageError => "Local session storage is unavailable.",
        };
        f.write_str(text)
    }
}

/// The view surface the core drives.
pub trait Ui {
    /// Show the login view, hiding the dashboard.
    fn show_login(&mut self);

    /// Show the dashboard view, hiding the login form.
    fn show_dashboard(&mut self);

    /// Write the points value to the dashboard.
    fn display_points(&mut self, points: u64);

    /// Raise a user-facing message.
    fn notify(&mut self, notice: Notice);
}
