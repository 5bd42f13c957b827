//! GTFS entities as handed over by the feed reader, and the values the agency
//! hooks hand back.
//!
//! Field names follow the GTFS reference so rows deserialize straight from
//! the feed's CSV files.

use serde::{Deserialize, Serialize};

/// A transportation route.
/// https://gtfs.org/documentation/schedule/reference/#routestxt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Route {
    pub route_id: String,
    pub route_short_name: String,
    pub route_long_name: Option<String>,
}

impl Route {
    pub fn new(route_id: &str, short_name: &str, long_name: &str) -> Self {
        Self {
            route_id: route_id.to_string(),
            route_short_name: short_name.to_string(),
            route_long_name: Some(long_name.to_string()),
        }
    }

    /// Long name, or an empty string when the feed left it out.
    pub fn long_name_or_default(&self) -> &str {
        self.route_long_name.as_deref().unwrap_or_default()
    }
}

/// A scheduled trip for a route.
/// https://gtfs.org/documentation/schedule/reference/#tripstxt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trip {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    pub trip_headsign: Option<String>,
    pub direction_id: Option<u8>,
}

impl Trip {
    pub fn headsign_or_default(&self) -> &str {
        self.trip_headsign.as_deref().unwrap_or_default()
    }

    /// GTFS direction, 0 when the feed does not set one.
    pub fn direction(&self) -> u8 {
        self.direction_id.unwrap_or(0)
    }
}

/// A physical stop.
/// https://gtfs.org/documentation/schedule/reference/#stopstxt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stop {
    pub stop_id: String,
    pub stop_code: Option<String>,
    pub stop_name: String,
}

/// Weekly service pattern row. Only the service is relevant to the agency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Calendar {
    pub service_id: String,
}

/// Service exception row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarDate {
    pub service_id: String,
}

/// Type of transportation used on a route.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
pub enum RouteType {
    #[serde(rename = "0")]
    Tram,
    #[serde(rename = "1")]
    Subway,
    #[serde(rename = "2")]
    Rail,
    #[serde(rename = "3")]
    Bus,
    #[serde(rename = "4")]
    Ferry,
}

/// Headsign chosen for a trip: the label riders see and the direction it is
/// grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripHeadsign {
    pub route_id: u64,
    pub direction: u8,
    pub label: String,
}

impl TripHeadsign {
    /// Splits a "from - to" label on its segment marker.
    pub fn legs(&self) -> Option<(&str, &str)> {
        self.label.split_once(crate::clean::SEGMENT_SEPARATOR)
    }
}

/// One row of the route table produced for a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub gtfs_short_name: String,
    pub route_id: u64,
    pub short_name: String,
    pub long_name: String,
}
