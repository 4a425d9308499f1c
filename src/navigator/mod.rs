//! The navigation engine: registry, active state, history and focus memory
//! behind one owned value.
//!
//! Hosts construct a [`Navigator`] explicitly and feed it registrations,
//! measurements, directional input and clock ticks. Nothing is global, so
//! independent instances can coexist (one per window, one per test).

mod active;
mod registration;
mod restore;


use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};

use crate::config::NavigatorConfig;
use crate::events::{NavigationEvent, SubscriptionId, Subscribers};
use crate::feedback::{Feedback, FeedbackSink};
use crate::logging::{LogLevel, event_with_fields, json_kv};
use crate::memory::{FocusMemory, MemoryPhase};
use crate::metrics::{MetricSnapshot, NavigationMetrics};
use crate::registry::{Region, Registry, Zone};
use crate::state::{History, HistoryEntry, NavigationError, NavigationState};
use crate::timers::{Scheduler, TimerId};

pub(crate) const REGISTRY_TARGET: &str = "room_nav::registry";
pub(crate) const NAVIGATION_TARGET: &str = "room_nav::navigation";
pub(crate) const MEMORY_TARGET: &str = "room_nav::memory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerTask {
    ClearError { generation: u64 },
    RetryRestore,
    HoverCooldownEnd,
}

pub struct Navigator {
    registry: Registry,
    state: NavigationState,
    history: History,
    memory: FocusMemory,
    timers: Scheduler<TimerTask>,
    subscribers: Subscribers,
    config: NavigatorConfig,
    debug: bool,
    error_generation: u64,
    hover_cooldown: Option<TimerId>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(NavigatorConfig::default())
    }
}

impl Navigator {
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            registry: Registry::new(),
            state: NavigationState::default(),
            history: History::with_capacity(config.history_capacity),
            memory: FocusMemory::new(),
            timers: Scheduler::new(),
            subscribers: Subscribers::new(),
            debug: config.debug,
            config,
            error_generation: 0,
            hover_cooldown: None,
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn active_region(&self) -> Option<&Region> {
        self.state
            .active_region
            .as_deref()
            .and_then(|id| self.registry.region(id))
    }

    /// The focused zone, if it is registered. A region's default zone can be
    /// active before it mounts, in which case this is `None`.
    pub fn active_zone(&self) -> Option<&Zone> {
        self.state
            .active_zone
            .as_deref()
            .and_then(|id| self.registry.zone(id))
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn last_error(&self) -> Option<&NavigationError> {
        self.state.last_error.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn memory(&self) -> &FocusMemory {
        &self.memory
    }

    pub fn memory_phase(&self) -> MemoryPhase {
        self.memory.phase()
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug
    }

    pub fn toggle_debug(&mut self) {
        self.set_debug(!self.debug);
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
        self.log(
            LogLevel::Info,
            NAVIGATION_TARGET,
            "debug_toggled",
            [json_kv("enabled", json!(enabled))],
        );
    }

    /// Milliseconds on the navigator clock.
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Whether pointer hover is currently suppressed after a keyboard move.
    pub fn hover_suppressed(&self) -> bool {
        self.hover_cooldown.is_some()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&NavigationEvent) + Send + 'static,
    {
        self.subscribers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Move the clock forward, firing every timer that falls due on the way.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some((id, task)) = self.timers.pop_due(until) {
            self.run_timer(id, task);
        }
        self.timers.settle(until);
    }

    fn run_timer(&mut self, id: TimerId, task: TimerTask) {
        match task {
            TimerTask::ClearError { generation } => self.expire_error(generation),
            TimerTask::RetryRestore => self.retry_restore(id),
            TimerTask::HoverCooldownEnd => {
                if self.hover_cooldown == Some(id) {
                    self.hover_cooldown = None;
                }
            }
        }
    }

    /// Shared metrics accumulator, when metrics are enabled.
    pub fn metrics(&self) -> Option<Arc<Mutex<NavigationMetrics>>> {
        self.config.metrics_handle()
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.timers.now()))
    }

    /// Write the current metrics snapshot to the configured logger.
    pub fn emit_metrics(&self) {
        let Some(logger) = self.config.logger.as_ref() else {
            return;
        };
        if let Some(snapshot) = self.metrics_snapshot() {
            let _ = logger.log_event(snapshot.to_log_event(&self.config.metrics_target));
        }
    }

    /// Log a structured snapshot of regions, zones, focus and memory.
    pub fn dump_state(&self) {
        let regions: Vec<Value> = self
            .registry
            .regions()
            .map(|region| {
                let zones: Vec<Value> = self
                    .registry
                    .zones_in(region.id())
                    .map(|zone| {
                        let active = self.state.is_zone_active(zone.id());
                        json!({
                            "id": zone.id(),
                            "kind": zone.kind(),
                            "group": zone.group(),
                            "items": zone.items(),
                            "selectable": zone.has_select_hook(),
                            "memory": zone.has_memory(),
                            "active": active,
                            "active_index": active.then_some(self.state.active_index),
                        })
                    })
                    .collect();
                json!({
                    "id": region.id(),
                    "active": self.state.is_region_active(region.id()),
                    "priority": region.priority(),
                    "persistent": region.is_persistent(),
                    "zones": zones,
                })
            })
            .collect();

        let memory = match (self.memory.path(), self.memory.snapshot()) {
            (Some(path), Some(snapshot)) => json!({ "path": path, "state": snapshot }),
            _ => Value::Null,
        };

        self.log(
            LogLevel::Debug,
            NAVIGATION_TARGET,
            "state_dump",
            [
                json_kv("regions", Value::Array(regions)),
                json_kv("state", json!(self.state)),
                json_kv("memory", memory),
            ],
        );
    }

    fn push_history(&mut self) {
        if let (Some(region), Some(zone)) = (&self.state.active_region, &self.state.active_zone) {
            self.history.push(HistoryEntry {
                region: region.clone(),
                zone: zone.clone(),
                index: self.state.active_index,
                timestamp_ms: self.timers.now_ms(),
            });
        }
    }

    fn emit(&mut self, event: NavigationEvent) {
        self.subscribers.emit(&event);
    }

    fn play(&self, feedback: Feedback) {
        self.trace(
            NAVIGATION_TARGET,
            "feedback",
            [json_kv("cue", json!(feedback.as_str()))],
        );
        self.config.feedback.play(feedback);
    }

    fn record(&self, update: impl FnOnce(&mut NavigationMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, target: &str, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, target, message, fields);
            let _ = logger.log_event(event);
        }
    }

    /// Verbose tracing, only while debug is on.
    fn trace<I>(&self, target: &str, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if self.debug {
            self.log(LogLevel::Debug, target, message, fields);
        }
    }

    fn warn<I>(&self, target: &str, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.log(LogLevel::Warn, target, message, fields);
    }

    fn feedback_handle(&self) -> Arc<dyn FeedbackSink> {
        Arc::clone(&self.config.feedback)
    }
}
