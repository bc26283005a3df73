//! Command implementations.
//!
//! Each command takes the storefront and a writer for its output, so tests
//! can run commands against in-memory tables and capture what they print.

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod render;
pub mod session;

use boutique_storefront::StorefrontError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The storefront refused or failed the operation.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Message to show on the terminal.
    pub fn user_message(&self) -> String {
        match self {
            Self::Storefront(e) => e.user_message(),
            Self::Io(e) => e.to_string(),
        }
    }

    /// Send internal errors to Sentry and log them.
    pub fn report(&self) {
        match self {
            Self::Storefront(e) => e.report(),
            Self::Io(e) => tracing::error!(error = %e, "Command output failed"),
        }
    }
}
