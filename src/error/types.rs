use thiserror::Error;

/// Unified result type for the navigation engine.
pub type Result<T> = std::result::Result<T, NavError>;

/// Structural wiring failures surfaced to the host UI.
///
/// Ordinary navigation outcomes (dead ends, stale indices, unrestorable
/// memory) are reported as `bool` returns instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("region `{0}` not found")]
    RegionNotFound(String),
    #[error("zone `{0}` not found")]
    ZoneNotFound(String),
    #[error("region `{0}` is already registered")]
    DuplicateRegion(String),
    #[error("zone `{0}` is already registered")]
    DuplicateZone(String),
}
