//! # sdc-client
//!
//! Client for the Secure Document Converter HTTP service: upload a
//! document, get the converted artifact back, with a correct output
//! filename even when the service does not supply one.
//!
//! ## Lifecycle Overview
//!
//! ```text
//! ConversionRequest
//!  │
//!  ├─ 1. Validate   file present, API key non-empty (no network yet)
//!  ├─ 2. Upload     multipart POST /convert/{kind} + X-API-Key
//!  ├─ 3. Classify   2xx payload │ service error body │ transport failure
//!  ├─ 4. Name       Content-Disposition (encoded ▸ quoted) ▸ derived
//!  └─ 5. Settle     history entry, Settling phase, delayed reset to Idle
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sdc_client::{ConversionClient, ConversionKind, ConversionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Base URL from SDC_BASE_URL, default http://localhost:8000
//!     let client = ConversionClient::from_env();
//!     let request = ConversionRequest::from_path(
//!         ConversionKind::DocxToPdf,
//!         "report.docx",
//!         "my-api-key",
//!     )
//!     .await?;
//!     let result = client.convert(request).await?;
//!     let saved = sdc_client::save::save_to_dir(&result, ".")?;
//!     println!("saved {}", saved.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Observing progress
//!
//! The client holds no UI state. Pass an observer to receive the
//! transition sequence (`Started`, `Progressed(20/80/100)`,
//! `Settled(outcome)`, then `Reset` after a short grace delay), or use
//! [`SharedState`] when you just want a `{phase, progress}` value to
//! render. The calling layer owns mutual exclusion: start a new attempt
//! only while the phase is `Idle`.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sdc` binary (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod disposition;
pub mod error;
pub mod history;
pub mod kind;
pub mod progress;
pub mod save;
pub mod state;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{ConversionClient, ConversionRequest, ConversionResult, SourceFile};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ConvertError;
pub use history::{HistoryEntry, HistoryLog, HISTORY_CAP};
pub use kind::ConversionKind;
pub use progress::{ConversionObserver, NoopObserver, Observer, SharedState};
pub use state::{ClientState, Outcome, Phase, Transition};
