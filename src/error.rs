//! Errors raised by the agency hooks.
//!
//! Every variant is fatal for a generation run: the rule tables no longer
//! cover the feed and need a new entry.

use thiserror::Error;

/// A rule-table gap detected while normalizing a feed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// No route ID rule matches this short name
    #[error("Unexpected route ID for short name '{short_name}'")]
    UnresolvableRouteId { short_name: String },
    /// Two different short names resolved to the same route ID
    #[error("Route ID {route_id} is shared by '{first}' and '{second}'")]
    DuplicateRouteId {
        route_id: u64,
        first: String,
        second: String,
    },
    /// The framework asked to merge two headsigns that are not a known ambiguity
    #[error(
        "Unexpected trips to merge on route {route_id} direction {direction}: '{label}' & '{label_to_merge}'"
    )]
    UnexpectedMerge {
        route_id: u64,
        direction: u8,
        label: String,
        label_to_merge: String,
    },
    /// Stop codes double as stop IDs and must be numeric
    #[error("Stop {stop_id} has no numeric stop code ({code:?})")]
    InvalidStopCode {
        stop_id: String,
        code: Option<String>,
    },
}
