//! The conversion orchestration client.
//!
//! [`ConversionClient`] owns the full request/response lifecycle for a
//! single conversion: it builds the multipart upload, issues the call,
//! classifies the outcome, resolves the output filename, and emits either
//! a [`ConversionResult`] or a typed [`ConvertError`]. Along the way it
//! reports state transitions to an observer and records exactly one
//! [`crate::history::HistoryEntry`] per attempt.
//!
//! ## Lifecycle
//!
//! ```text
//! validate ── fail ──▶ ValidationError (no network, no transitions)
//!    │
//!    ├─ Started, Progressed(20)      request dispatched
//!    ├─ POST /convert/{kind}         multipart `file` + X-API-Key
//!    ├─ Progressed(80)               success status received
//!    ├─ read payload, resolve name   header beats derived fallback
//!    └─ Settled(outcome)             history entry, delayed Reset
//! ```
//!
//! The settle bookkeeping (history entry, `Settled`, scheduled `Reset`)
//! runs on every exit path after dispatch, success and failure alike, so
//! no error can leave an observer stuck in `InProgress`.
//!
//! The client performs exactly one attempt — no retries, no timeout beyond
//! the transport's own, no cancellation. It also does not serialise
//! concurrent calls: the calling layer enforces at most one in-flight
//! conversion by checking `phase == Idle` before starting a new attempt.

use crate::config::ClientConfig;
use crate::disposition;
use crate::error::ConvertError;
use crate::history::{HistoryEntry, HistoryLog};
use crate::kind::ConversionKind;
use crate::progress::{ConversionObserver, NoopObserver, Observer};
use crate::state::{Outcome, Transition, PROGRESS_DISPATCHED, PROGRESS_DONE, PROGRESS_HEADERS};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// A source document with its original name.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Original filename, sent with the upload and used for the fallback
    /// output name.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a source document from disk, taking its name from the path.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let bytes =
            tokio::fs::read(path)
                .await
                .map_err(|e| ConvertError::SourceReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }
}

/// Everything needed for one conversion attempt.
///
/// `source` is an `Option` on purpose: the calling layer typically wires a
/// drop surface that may be empty, and a missing file must surface as a
/// validation error from [`ConversionClient::convert`] rather than a type
/// error at the call site.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub kind: ConversionKind,
    pub source: Option<SourceFile>,
    pub api_key: String,
}

impl ConversionRequest {
    pub fn new(kind: ConversionKind, source: SourceFile, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            source: Some(source),
            api_key: api_key.into(),
        }
    }

    /// Build a request by reading the source document from disk.
    pub async fn from_path(
        kind: ConversionKind,
        path: impl AsRef<Path>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConvertError> {
        Ok(Self::new(kind, SourceFile::from_path(path).await?, api_key))
    }
}

/// The converted artifact and the name to save it under.
///
/// `filename` is never empty: it is either the service-supplied name or
/// the derived fallback carrying the kind's target extension.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub payload: Vec<u8>,
    pub filename: String,
}

/// Client for the Secure Document Converter service.
///
/// Cheap to share behind an `Arc`; holds the HTTP connection pool, the
/// session history log, and the configured observer.
pub struct ConversionClient {
    http: reqwest::Client,
    config: ClientConfig,
    observer: Observer,
    history: Mutex<HistoryLog>,
}

impl ConversionClient {
    /// Client with no observer.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_observer(config, Arc::new(NoopObserver))
    }

    /// Client reporting transitions to the given observer.
    pub fn with_observer(config: ClientConfig, observer: Observer) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            observer,
            history: Mutex::new(HistoryLog::new()),
        }
    }

    /// Client configured from the environment (`SDC_BASE_URL`).
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the session history, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        match self.history.lock() {
            Ok(guard) => guard.entries(),
            Err(poisoned) => poisoned.into_inner().entries(),
        }
    }

    /// Run one conversion attempt.
    ///
    /// # Errors
    ///
    /// * [`ConvertError::MissingFile`] / [`ConvertError::MissingApiKey`] —
    ///   caught locally, nothing was sent.
    /// * [`ConvertError::Service`] — the service answered with a
    ///   non-success status; the message carries its diagnostic body.
    /// * [`ConvertError::Transport`] — no response was obtained.
    pub async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConvertError> {
        let ConversionRequest {
            kind,
            source,
            api_key,
        } = request;

        // Fail fast before any state transition or network traffic.
        let source = match source {
            Some(source) => source,
            None => {
                warn!("Rejecting {kind} attempt: no source file");
                self.record(HistoryEntry::failure(kind, "-"));
                return Err(ConvertError::MissingFile);
            }
        };
        if api_key.trim().is_empty() {
            warn!("Rejecting {kind} attempt: empty API key");
            self.record(HistoryEntry::failure(kind, &source.name));
            return Err(ConvertError::MissingApiKey);
        }

        let input_name = source.name.clone();
        self.emit(Transition::Started);
        self.emit(Transition::Progressed(PROGRESS_DISPATCHED));

        let outcome = self.dispatch(kind, source, &api_key).await;

        // Settle bookkeeping — runs on both paths.
        match &outcome {
            Ok(result) => {
                self.record(HistoryEntry::success(kind, &input_name, &result.filename));
                self.emit(Transition::Settled(Outcome::Success));
            }
            Err(e) => {
                warn!("Conversion {kind} of '{input_name}' failed: {e}");
                self.record(HistoryEntry::failure(kind, &input_name));
                self.emit(Transition::Settled(Outcome::Failure));
            }
        }
        self.schedule_reset();

        outcome
    }

    /// Issue the upload and classify the response.
    async fn dispatch(
        &self,
        kind: ConversionKind,
        source: SourceFile,
        api_key: &str,
    ) -> Result<ConversionResult, ConvertError> {
        let SourceFile { name, bytes } = source;
        let url = format!("{}/convert/{}", self.config.base_url, kind.endpoint_segment());
        info!("POST {url} ('{name}', {} bytes)", bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .header("X-API-Key", api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ConvertError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            // Best-effort body read: an unreadable body degrades to the
            // status-coded default, never to an empty message.
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!("Conversion failed ({})", status.as_u16())
            } else {
                body
            };
            debug!("Service returned HTTP {status} for {kind}");
            return Err(ConvertError::Service {
                status: status.as_u16(),
                message,
            });
        }

        self.emit(Transition::Progressed(PROGRESS_HEADERS));

        // Capture the naming header before the body is consumed.
        let content_disposition = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let payload = response
            .bytes()
            .await
            .map_err(|e| ConvertError::Transport {
                reason: e.to_string(),
            })?
            .to_vec();

        let filename = disposition::resolve_filename(content_disposition.as_deref(), &name, kind);

        self.emit(Transition::Progressed(PROGRESS_DONE));
        info!("Converted '{name}' -> '{filename}' ({} bytes)", payload.len());

        Ok(ConversionResult { payload, filename })
    }

    fn record(&self, entry: HistoryEntry) {
        match self.history.lock() {
            Ok(mut guard) => guard.record(entry),
            Err(poisoned) => poisoned.into_inner().record(entry),
        }
    }

    fn emit(&self, transition: Transition) {
        emit(&self.observer, transition);
    }

    /// After the settle grace delay, return observers to `Idle/0`.
    ///
    /// Spawned rather than awaited so `convert` returns as soon as the
    /// attempt settles; a UI gets the delay to render the finished bar.
    fn schedule_reset(&self) {
        let observer = Arc::clone(&self.observer);
        let delay = Duration::from_millis(self.config.settle_delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            emit(&observer, Transition::Reset);
        });
    }
}

/// Fan one transition out to the generic hook and its narrow counterpart.
fn emit(observer: &Arc<dyn ConversionObserver>, transition: Transition) {
    observer.on_transition(transition);
    match transition {
        Transition::Started => observer.on_started(),
        Transition::Progressed(n) => observer.on_progress(n),
        Transition::Settled(outcome) => observer.on_settled(outcome),
        Transition::Reset => observer.on_reset(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Network behaviour is covered by tests/e2e.rs against a mock service;
    // these cover the request-construction surface.

    #[tokio::test]
    async fn missing_source_file_is_a_read_error() {
        let err = SourceFile::from_path("/definitely/not/a/real/file.docx")
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::SourceReadFailed { .. }));
    }

    #[test]
    fn request_new_always_carries_a_source() {
        let req = ConversionRequest::new(
            ConversionKind::DocxToPdf,
            SourceFile::new("a.docx", vec![1, 2, 3]),
            "key",
        );
        assert!(req.source.is_some());
    }
}
