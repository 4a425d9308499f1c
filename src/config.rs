use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::feedback::{FeedbackSink, NullFeedback};
use crate::logging::Logger;
use crate::memory::DEFAULT_MAX_RESTORE_ATTEMPTS;
use crate::metrics::NavigationMetrics;
use crate::state::DEFAULT_HISTORY_CAPACITY;

/// Configuration knobs for a [`Navigator`](crate::Navigator).
#[derive(Clone)]
pub struct NavigatorConfig {
    /// Optional structured logger. Warnings are always emitted to it; verbose
    /// tracing only while debug is on.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the host.
    pub metrics: Option<Arc<Mutex<NavigationMetrics>>>,
    /// Target used when emitting metrics snapshots.
    pub metrics_target: String,
    /// Feedback cues for move/select/error.
    pub feedback: Arc<dyn FeedbackSink>,
    /// Start with verbose tracing enabled.
    pub debug: bool,
    pub history_capacity: usize,
    /// How long a dead-end error stays visible.
    pub error_clear_delay: Duration,
    /// Delay between attempts while waiting for a remembered zone to mount.
    pub restore_retry_interval: Duration,
    pub max_restore_attempts: u32,
    /// Pointer hover is ignored for this long after a keyboard move.
    pub hover_cooldown: Duration,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            metrics_target: "room_nav::metrics".to_string(),
            feedback: Arc::new(NullFeedback),
            debug: false,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            error_clear_delay: Duration::from_millis(500),
            restore_retry_interval: Duration::from_millis(100),
            max_restore_attempts: DEFAULT_MAX_RESTORE_ATTEMPTS,
            hover_cooldown: Duration::from_millis(1000),
        }
    }
}

impl NavigatorConfig {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_feedback<S>(mut self, feedback: S) -> Self
    where
        S: FeedbackSink + 'static,
    {
        self.feedback = Arc::new(feedback);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(NavigationMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<NavigationMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}
