//! Event-driven front end for a [`Navigator`].
//!
//! Hosts translate their own input, layout and router callbacks into
//! [`NavEvent`]s and hand them to [`NavigationRuntime::dispatch`], or replay a
//! recorded script with [`NavigationRuntime::run_scripted`].

use std::time::Duration;

use crossterm::event::KeyEvent;
use serde_json::json;

use crate::input::{KeyBindings, NavAction};
use crate::logging::{LogLevel, json_kv};
use crate::registry::ZoneMeasurement;
use crate::Navigator;

const RUNTIME_TARGET: &str = "room_nav::runtime";

#[derive(Debug, Clone)]
pub enum NavEvent {
    Key(KeyEvent),
    Action(NavAction),
    Tick { elapsed: Duration },
    /// The host router settled on a new path.
    RouteChanged(String),
    Hover { zone: String, index: usize },
    Measured {
        zone: String,
        measurement: ZoneMeasurement,
    },
}

/// Whether the runtime acted on an event. Unconsumed keys should fall through
/// to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    Consumed,
}

impl EventFlow {
    fn from_handled(handled: bool) -> Self {
        if handled {
            EventFlow::Consumed
        } else {
            EventFlow::Continue
        }
    }
}

pub struct NavigationRuntime {
    navigator: Navigator,
    bindings: KeyBindings,
    current_path: Option<String>,
}

impl NavigationRuntime {
    pub fn new(navigator: Navigator) -> Self {
        Self::with_bindings(navigator, KeyBindings::default())
    }

    pub fn with_bindings(navigator: Navigator, bindings: KeyBindings) -> Self {
        Self {
            navigator,
            bindings,
            current_path: None,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    pub fn dispatch(&mut self, event: NavEvent) -> EventFlow {
        let label = Self::describe_event(&event);
        let flow = match event {
            NavEvent::Key(key) => match self.bindings.resolve(&key) {
                Some(action) => self.apply_action(action),
                None => EventFlow::Continue,
            },
            NavEvent::Action(action) => self.apply_action(action),
            NavEvent::Tick { elapsed } => {
                self.navigator.advance(elapsed);
                EventFlow::Continue
            }
            NavEvent::RouteChanged(path) => {
                self.change_route(path);
                EventFlow::Continue
            }
            NavEvent::Hover { zone, index } => {
                EventFlow::from_handled(self.navigator.hover(&zone, index))
            }
            NavEvent::Measured { zone, measurement } => EventFlow::from_handled(matches!(
                self.navigator.update_zone(&zone, measurement),
                Ok(true)
            )),
        };

        if self.navigator.is_debug_enabled() {
            self.log(
                LogLevel::Debug,
                "event_dispatched",
                [
                    json_kv("event", json!(label)),
                    json_kv("consumed", json!(flow == EventFlow::Consumed)),
                ],
            );
        }
        flow
    }

    pub fn run_scripted<I>(&mut self, events: I) -> Vec<EventFlow>
    where
        I: IntoIterator<Item = NavEvent>,
    {
        events.into_iter().map(|event| self.dispatch(event)).collect()
    }

    /// Tear down: cancels any restore still waiting on the clock.
    pub fn shutdown(&mut self) {
        self.navigator.cleanup();
        self.log(
            LogLevel::Info,
            "runtime_stopped",
            [json_kv("path", json!(self.current_path))],
        );
    }

    fn apply_action(&mut self, action: NavAction) -> EventFlow {
        let handled = match action {
            NavAction::Move(direction) => self.navigator.navigate(direction),
            NavAction::Select => self.navigator.handle_select(),
            NavAction::DefaultZone => self.navigator.activate_default_zone(),
            NavAction::CycleRegion(step) => self.navigator.cycle_region(step),
        };
        EventFlow::from_handled(handled)
    }

    /// Remember focus for the path being left, then restore whatever was
    /// remembered for the path being entered.
    fn change_route(&mut self, path: String) {
        if let Some(previous) = self.current_path.take() {
            self.navigator.save_state(&previous);
        }
        self.navigator.restore_state(&path);
        self.current_path = Some(path);
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.navigator.config().logger.as_ref() {
            let fields = fields.into_iter().collect();
            let _ = logger.log_with_fields(level, RUNTIME_TARGET, message, fields);
        }
    }

    fn describe_event(event: &NavEvent) -> &'static str {
        match event {
            NavEvent::Key(_) => "key",
            NavEvent::Action(_) => "action",
            NavEvent::Tick { .. } => "tick",
            NavEvent::RouteChanged(_) => "route_changed",
            NavEvent::Hover { .. } => "hover",
            NavEvent::Measured { .. } => "measured",
        }
    }
}
