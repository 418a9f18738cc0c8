//! Error types for the sdc-client library.
//!
//! The taxonomy mirrors the three ways a conversion attempt can fail, and
//! callers can branch on it to decide whether retrying makes sense:
//!
//! * **Validation** ([`ConvertError::MissingFile`],
//!   [`ConvertError::MissingApiKey`]) — the request was never sent; fix the
//!   input and call again. Guaranteed to happen before any network traffic.
//! * **Service** ([`ConvertError::Service`]) — the service answered with a
//!   non-success status. The message preserves the service's own diagnostic
//!   body when one was sent.
//! * **Transport** ([`ConvertError::Transport`]) — the request never got an
//!   answer (DNS failure, connection refused, reset mid-response).
//!
//! The remaining variants cover the file-system conveniences around the
//! core call (reading a source document, saving an artifact).

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the sdc-client library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Validation errors (no network call was made) ─────────────────────
    /// No source file was attached to the request.
    #[error("No file to convert: attach a source file before calling convert")]
    MissingFile,

    /// The API key was empty or blank.
    #[error("API key is required.\nPass one explicitly or set SDC_API_KEY.")]
    MissingApiKey,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Service errors ───────────────────────────────────────────────────
    /// The service answered with a non-success status.
    ///
    /// `message` is the response body when the service sent one, otherwise
    /// a status-coded default — never empty.
    #[error("{message}")]
    Service { status: u16, message: String },

    // ── Transport errors ─────────────────────────────────────────────────
    /// The request failed before a response was obtained.
    #[error("Could not reach conversion service: {reason}\nCheck the base URL and your network connection.")]
    Transport { reason: String },

    // ── I/O errors (file helpers only) ───────────────────────────────────
    /// The source document could not be read from disk.
    #[error("Failed to read source file '{path}': {source}")]
    SourceReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The converted artifact could not be written.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// True for failures caught before any network activity.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConvertError::MissingFile | ConvertError::MissingApiKey
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_display_is_the_message() {
        // The service's own diagnostic text is surfaced verbatim; the
        // status lives in the variant for callers that branch on it.
        let e = ConvertError::Service {
            status: 413,
            message: "File too large (> 26214400 bytes)".into(),
        };
        assert_eq!(e.to_string(), "File too large (> 26214400 bytes)");
    }

    #[test]
    fn transport_display_includes_reason() {
        let e = ConvertError::Transport {
            reason: "connection refused".into(),
        };
        assert!(e.to_string().contains("connection refused"));
    }

    #[test]
    fn validation_classification() {
        assert!(ConvertError::MissingFile.is_validation());
        assert!(ConvertError::MissingApiKey.is_validation());
        assert!(!ConvertError::Transport { reason: "x".into() }.is_validation());
        assert!(!ConvertError::Service {
            status: 500,
            message: "y".into()
        }
        .is_validation());
    }

    #[test]
    fn output_write_failed_carries_source() {
        use std::error::Error as _;
        let e = ConvertError::OutputWriteFailed {
            path: PathBuf::from("/out/report.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("report.pdf"));
    }
}
