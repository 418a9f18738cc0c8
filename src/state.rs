//! Client-side state machine for a single conversion attempt.
//!
//! The client never holds UI state itself. It reports [`Transition`]s
//! through a [`crate::progress::ConversionObserver`], and callers that want
//! a concrete `{phase, progress}` value apply those transitions to a
//! [`ClientState`] they own. This keeps the observable sequence
//! (Idle → InProgress → Settling → Idle) explicit without any ambient
//! mutable state inside the library.

use serde::{Deserialize, Serialize};

/// Progress watermark emitted right after the request is dispatched.
pub const PROGRESS_DISPATCHED: u8 = 20;
/// Progress watermark emitted once a success status line is received.
pub const PROGRESS_HEADERS: u8 = 80;
/// Progress watermark emitted when the attempt settles.
pub const PROGRESS_DONE: u8 = 100;

/// Grace period between settling and the reset to `Idle/0`, in
/// milliseconds. Long enough for an observer to render the finished bar.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Where the client is within a conversion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// No attempt running; a new one may be started.
    #[default]
    Idle,
    /// A request has been dispatched and not yet settled.
    InProgress,
    /// The attempt finished (either way); awaiting the reset delay.
    Settling,
}

/// Terminal outcome of one conversion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Success,
    Failure,
}

/// A state change reported by the client as an attempt advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The attempt began; phase becomes `InProgress`.
    Started,
    /// Progress advanced to the given watermark (0–100).
    Progressed(u8),
    /// The attempt finished with the given outcome; phase becomes
    /// `Settling`. Progress keeps its last watermark (a failed attempt
    /// settles at whatever point it reached).
    Settled(Outcome),
    /// The settle delay elapsed; phase returns to `Idle`, progress to 0.
    Reset,
}

/// The `{phase, progress}` pair a rendering layer cares about.
///
/// Mutated only through [`ClientState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientState {
    pub phase: Phase,
    /// 0–100.
    pub progress: u8,
}

impl ClientState {
    /// A fresh `Idle/0` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one reported transition.
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Started => {
                self.phase = Phase::InProgress;
                self.progress = 0;
            }
            Transition::Progressed(n) => {
                self.progress = n.min(PROGRESS_DONE);
            }
            Transition::Settled(_) => {
                self.phase = Phase::Settling;
            }
            Transition::Reset => {
                self.phase = Phase::Idle;
                self.progress = 0;
            }
        }
    }

    /// True when a new attempt may be started.
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle_zero() {
        let s = ClientState::new();
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.progress, 0);
        assert!(s.is_idle());
    }

    #[test]
    fn success_sequence() {
        let mut s = ClientState::new();
        s.apply(Transition::Started);
        assert_eq!(s.phase, Phase::InProgress);
        s.apply(Transition::Progressed(PROGRESS_DISPATCHED));
        assert_eq!(s.progress, 20);
        s.apply(Transition::Progressed(PROGRESS_HEADERS));
        assert_eq!(s.progress, 80);
        s.apply(Transition::Progressed(PROGRESS_DONE));
        s.apply(Transition::Settled(Outcome::Success));
        assert_eq!(s.phase, Phase::Settling);
        assert_eq!(s.progress, 100);
        s.apply(Transition::Reset);
        assert!(s.is_idle());
        assert_eq!(s.progress, 0);
    }

    #[test]
    fn failure_also_settles_then_resets() {
        let mut s = ClientState::new();
        s.apply(Transition::Started);
        s.apply(Transition::Progressed(PROGRESS_DISPATCHED));
        s.apply(Transition::Settled(Outcome::Failure));
        assert_eq!(s.phase, Phase::Settling);
        // A failed attempt settles at its last watermark.
        assert_eq!(s.progress, PROGRESS_DISPATCHED);
        s.apply(Transition::Reset);
        assert_eq!(s, ClientState::new());
    }

    #[test]
    fn progress_is_clamped_to_100() {
        let mut s = ClientState::new();
        s.apply(Transition::Progressed(250));
        assert_eq!(s.progress, 100);
    }
}
