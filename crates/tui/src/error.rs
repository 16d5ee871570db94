//! Fatal errors for the client binary.
//!
//! Backend failures never reach this type: the gateway reports
//! `store::GatewayError` values and the app turns them into toasts. What is
//! left here is the small set of conditions that actually abort the program.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    /// A setting that parsed as text but cannot be used, such as a
    /// malformed `base_url` or `user_id`.
    #[error("invalid setting: {0}")]
    Setting(String),
    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("terminal draw: {0}")]
    Draw(String),
}
