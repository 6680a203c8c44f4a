//! pipe-points - console client for the Pipe Network points dashboard.
//!
//! Discovers the active API base URL, signs in against it, persists the
//! bearer token locally, and shows the points balance.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pipe_points::api::ApiClient;
use pipe_points::app::{App, AuthState};
use pipe_points::auth::SessionStore;
use pipe_points::config::Config;
use pipe_points::ui::ConsoleUi;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("Usage: pipe-points [status|login <email> [password]|points|logout]");
}

/// Read a password from stdin when it was not passed as an argument.
fn read_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("pipe-points starting");

    let config = Config::load().context("Failed to load configuration")?;
    let data_dir = Config::data_dir().context("Failed to locate data directory")?;

    let api = ApiClient::new().context("Failed to build API client")?;
    let store = SessionStore::new(data_dir);
    let mut app = App::new(api, store.clone(), ConsoleUi);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("status");

    match command {
        "status" => {
            app.bootstrap().await;
            if app.state() == AuthState::Authenticated {
                if let Ok(Some(username)) = store.get_username().await {
                    println!("Signed in as {}", username);
                }
            }
        }
        "login" => {
            let email = match args.get(1) {
                Some(email) => email.clone(),
                None => {
                    print_usage();
                    std::process::exit(2);
                }
            };
            let password = match args.get(2) {
                Some(password) => password.clone(),
                None => read_password()?,
            };

            app.login(&email, &password).await;
            if app.state() == AuthState::Authenticated {
                let mut config = config;
                config.last_email = Some(email);
                config.save().context("Failed to save configuration")?;
            } else {
                std::process::exit(1);
            }
        }
        "points" => {
            app.fetch_points().await;
        }
        "logout" => {
            app.logout().await;
        }
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }

    info!("pipe-points exiting");
    Ok(())
}
