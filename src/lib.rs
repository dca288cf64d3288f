//! Blindify Backend Library
//!
//! This library implements the backend-for-frontend of the Blindify blind-test
//! game. It brokers the Spotify OAuth authorization-code flow on behalf of the
//! browser client, keeps encrypted refresh tokens in memory, and proxies a small
//! set of read endpoints whose payloads are paginated and reshaped into a stable
//! schema for the frontend.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the auth and Spotify routes
//! - `config` - Environment loading and the explicit settings struct
//! - `error` - Domain error taxonomy and its HTTP mapping
//! - `management` - Refresh-token encryption and session storage
//! - `server` - Router assembly and the HTTP listener
//! - `spotify` - Spotify accounts and Web API integration
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use blindify::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> blindify::Res<()> {
//!     config::load_env();
//!     let settings = config::Settings::from_env()?;
//!     server::start_api_server(settings).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;

pub use error::{BlindifyError, Result};

/// A convenient Result type alias for bootstrapping code that may fail.
///
/// Library operations return [`Result`] with a typed [`BlindifyError`]; this
/// boxed alias is used where heterogeneous errors meet, such as binding the
/// listener or assembling settings in `main`.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Session {} created", user_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal bootstrap failures (invalid configuration, address
/// already in use). Request handling never calls this macro.
///
/// # Example
///
/// ```
/// error!("Invalid configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues: upstream failures surfaced to a caller,
/// stale sessions being dropped, or an ephemeral encryption key.
///
/// # Example
///
/// ```
/// warning!("Refresh for session {} rejected upstream", user_id);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
