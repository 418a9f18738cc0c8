//! Observer trait for conversion state transitions.
//!
//! Inject an [`Arc<dyn ConversionObserver>`] via
//! [`crate::client::ConversionClient::with_observer`] to receive the
//! transition sequence as an attempt runs.
//!
//! # Why a callback trait instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward transitions to a terminal progress bar, a GUI binding, or a
//! broadcast channel without the library knowing anything about how the
//! host application renders. The trait is `Send + Sync` because the
//! post-settle reset fires from a spawned task after the configured grace
//! delay.

use crate::state::{ClientState, Outcome, Transition};
use std::sync::{Arc, Mutex};

/// Called by [`crate::client::ConversionClient`] as an attempt advances.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. `on_transition` receives every event; the narrower
/// hooks are conveniences layered on top of the same sequence.
pub trait ConversionObserver: Send + Sync {
    /// Called for every reported transition, in order.
    fn on_transition(&self, transition: Transition) {
        let _ = transition;
    }

    /// Called once when the attempt enters `InProgress`.
    fn on_started(&self) {}

    /// Called when the progress watermark advances.
    fn on_progress(&self, percent: u8) {
        let _ = percent;
    }

    /// Called once when the attempt settles, on success and failure alike.
    fn on_settled(&self, outcome: Outcome) {
        let _ = outcome;
    }

    /// Called once after the settle delay, when state returns to `Idle/0`.
    fn on_reset(&self) {}
}

/// A no-op implementation for callers that don't need transitions.
///
/// This is the default when no observer is configured.
pub struct NoopObserver;

impl ConversionObserver for NoopObserver {}

/// Convenience alias matching the type stored in the client.
pub type Observer = Arc<dyn ConversionObserver>;

/// A shared `{phase, progress}` value kept current by applying every
/// transition — the caller-owned state object from the redesign notes.
///
/// Clone it (cheap, it is an `Arc`) into the client as the observer and
/// keep a handle for rendering:
///
/// ```rust
/// use sdc_client::{SharedState, Phase};
///
/// let state = SharedState::new();
/// assert_eq!(state.get().phase, Phase::Idle);
/// ```
#[derive(Clone, Default)]
pub struct SharedState(Arc<Mutex<ClientState>>);

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> ClientState {
        match self.0.lock() {
            Ok(guard) => *guard,
            // A poisoned lock still holds a valid Copy value.
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl ConversionObserver for SharedState {
    fn on_transition(&self, transition: Transition) {
        match self.0.lock() {
            Ok(mut guard) => guard.apply(transition),
            Err(poisoned) => poisoned.into_inner().apply(transition),
        }
    }
}
