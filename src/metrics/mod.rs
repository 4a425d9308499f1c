use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated by a [`Navigator`](crate::Navigator).
#[derive(Debug, Default, Clone)]
pub struct NavigationMetrics {
    moves: u64,
    zone_jumps: u64,
    dead_ends: u64,
    selects: u64,
    restores: u64,
    restore_retries: u64,
    abandoned_restores: u64,
}

impl NavigationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    pub fn record_zone_jump(&mut self) {
        self.zone_jumps = self.zone_jumps.saturating_add(1);
    }

    pub fn record_dead_end(&mut self) {
        self.dead_ends = self.dead_ends.saturating_add(1);
    }

    pub fn record_select(&mut self) {
        self.selects = self.selects.saturating_add(1);
    }

    pub fn record_restore(&mut self) {
        self.restores = self.restores.saturating_add(1);
    }

    pub fn record_restore_retry(&mut self) {
        self.restore_retries = self.restore_retries.saturating_add(1);
    }

    pub fn record_abandoned_restore(&mut self) {
        self.abandoned_restores = self.abandoned_restores.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            moves: self.moves,
            zone_jumps: self.zone_jumps,
            dead_ends: self.dead_ends,
            selects: self.selects,
            restores: self.restores,
            restore_retries: self.restore_retries,
            abandoned_restores: self.abandoned_restores,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub moves: u64,
    pub zone_jumps: u64,
    pub dead_ends: u64,
    pub selects: u64,
    pub restores: u64,
    pub restore_retries: u64,
    pub abandoned_restores: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "navigation_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("moves".to_string(), json!(self.moves));
        map.insert("zone_jumps".to_string(), json!(self.zone_jumps));
        map.insert("dead_ends".to_string(), json!(self.dead_ends));
        map.insert("selects".to_string(), json!(self.selects));
        map.insert("restores".to_string(), json!(self.restores));
        map.insert("restore_retries".to_string(), json!(self.restore_retries));
        map.insert(
            "abandoned_restores".to_string(),
            json!(self.abandoned_restores),
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_counters() {
        let mut metrics = NavigationMetrics::new();
        metrics.record_move();
        metrics.record_move();
        metrics.record_dead_end();
        let snap = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snap.uptime_ms, 1500);
        assert_eq!(snap.moves, 2);
        assert_eq!(snap.dead_ends, 1);
        assert_eq!(snap.selects, 0);
    }

    #[test]
    fn snapshot_log_event_carries_fields() {
        let mut metrics = NavigationMetrics::new();
        metrics.record_restore();
        let event = metrics
            .snapshot(Duration::ZERO)
            .to_log_event("room_nav::metrics");
        assert_eq!(event.target, "room_nav::metrics");
        assert_eq!(event.field("restores"), Some(&json!(1)));
    }
}
