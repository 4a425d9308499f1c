//! Fire-and-forget feedback hooks (audio cues in the host application).
//!
//! The navigator only reports *that* a cue should play; sinks never return
//! anything and a failing sink must swallow its own errors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Focus moved to a new item or zone.
    Move,
    /// The active item was selected.
    Select,
    /// Navigation hit a dead end.
    Error,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Move => "move",
            Feedback::Select => "select",
            Feedback::Error => "error",
        }
    }
}

pub trait FeedbackSink: Send + Sync {
    fn play(&self, feedback: Feedback);
}

/// Default sink used when the host wires no feedback.
#[derive(Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn play(&self, _feedback: Feedback) {}
}

/// Wraps another sink with a mute switch.
pub struct MutableFeedback<S> {
    inner: S,
    muted: AtomicBool,
}

impl<S: FeedbackSink> MutableFeedback<S> {
    pub fn new(inner: S, muted: bool) -> Self {
        Self {
            inner,
            muted: AtomicBool::new(muted),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    pub fn toggle_mute(&self) {
        self.muted.fetch_xor(true, Ordering::Relaxed);
    }
}

impl<S: FeedbackSink> FeedbackSink for MutableFeedback<S> {
    fn play(&self, feedback: Feedback) {
        if !self.is_muted() {
            self.inner.play(feedback);
        }
    }
}

/// Records every cue. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    played: Arc<Mutex<Vec<Feedback>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Feedback> {
        self.played
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn play(&self, feedback: Feedback) {
        if let Ok(mut guard) = self.played.lock() {
            guard.push(feedback);
        }
    }
}
