//! Report renderers and transports.
//!
//! Everything here consumes [`crate::models::Report`] fields as-is; no
//! renderer recomputes a value.

use thiserror::Error;

pub mod console;
pub mod html;
pub mod slack;

/// Rendering/transport errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook returned HTTP {status}: {message}")]
    WebhookStatus { status: u16, message: String },
}
