//! Hooks the GTFS framework calls while normalizing a feed.
//!
//! [`AgencyTools`] lists every hook with the framework's generic behaviour as
//! its default. [`CitrousAgency`] overrides the ones CITROUS needs.

use tracing::debug;

use crate::clean::clean_label_fr;
use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::filter::ServiceFilter;
use crate::headsigns::{self, HeadsignRule, MergeRule};
use crate::model::{Calendar, CalendarDate, Route, RouteType, Stop, Trip, TripHeadsign};
use crate::{routes, stops};

pub trait AgencyTools {
    /// Services kept for this run.
    fn service_filter(&self) -> &ServiceFilter;

    fn agency_color(&self) -> &str;

    fn agency_route_type(&self) -> RouteType;

    /// # Errors
    ///
    /// Fails when the route ID is not a number.
    fn route_id(&self, route: &Route) -> Result<u64, AdapterError> {
        route
            .route_id
            .parse()
            .map_err(|_| AdapterError::UnresolvableRouteId {
                short_name: route.route_short_name.clone(),
            })
    }

    fn route_short_name(&self, route: &Route) -> String {
        route.route_short_name.clone()
    }

    fn route_long_name(&self, route: &Route) -> String {
        clean_label_fr(route.long_name_or_default())
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        clean_label_fr(headsign)
    }

    /// Cleans a headsign used to name a direction, possibly taken from the
    /// last stop's name.
    fn clean_direction_headsign(&self, _from_stop_name: bool, headsign: &str) -> String {
        self.clean_trip_headsign(headsign)
    }

    fn clean_stop_name(&self, name: &str) -> String {
        clean_label_fr(name)
    }

    /// # Errors
    ///
    /// Fails when the stop ID is not a number.
    fn stop_id(&self, stop: &Stop) -> Result<u32, AdapterError> {
        stop.stop_id
            .parse()
            .map_err(|_| AdapterError::InvalidStopCode {
                stop_id: stop.stop_id.clone(),
                code: stop.stop_code.clone(),
            })
    }

    fn trip_headsign(&self, route_id: u64, trip: &Trip) -> TripHeadsign {
        TripHeadsign {
            route_id,
            direction: trip.direction(),
            label: self.clean_trip_headsign(trip.headsign_or_default()),
        }
    }

    /// # Errors
    ///
    /// Any merge the agency does not know about is fatal.
    fn merge_headsigns(
        &self,
        headsign: &TripHeadsign,
        to_merge: &TripHeadsign,
    ) -> Result<String, AdapterError> {
        headsigns::merge(&[], headsign, to_merge)
    }

    /// Whether the framework may guess trip directions from stop sequences.
    fn direction_finder_enabled(&self, _route_id: u64) -> bool {
        false
    }

    fn excluding_all(&self) -> bool {
        self.service_filter().excluding_all()
    }

    fn exclude_calendar(&self, calendar: &Calendar) -> bool {
        self.service_filter().excludes(&calendar.service_id)
    }

    fn exclude_calendar_date(&self, calendar_date: &CalendarDate) -> bool {
        self.service_filter().excludes(&calendar_date.service_id)
    }

    fn exclude_trip(&self, trip: &Trip) -> bool {
        self.service_filter().excludes(&trip.service_id)
    }
}

/// Roussillon CITROUS bus.
/// https://exo.quebec/en/about/open-data
#[derive(Debug, Clone)]
pub struct CitrousAgency {
    service_filter: ServiceFilter,
    headsign_rules: Vec<HeadsignRule>,
    merge_rules: Vec<MergeRule>,
}

impl CitrousAgency {
    /// Dark gray, from the GTFS.
    pub const AGENCY_COLOR: &'static str = "1F1F1F";

    pub fn new(config: AdapterConfig) -> Self {
        let service_filter = config.service_filter();
        Self::with_rules(service_filter, config.headsign_rules, config.merge_rules)
    }

    pub fn with_rules(
        service_filter: ServiceFilter,
        headsign_rules: Vec<HeadsignRule>,
        merge_rules: Vec<MergeRule>,
    ) -> Self {
        debug!(
            excluding_all = service_filter.excluding_all(),
            headsign_rules = headsign_rules.len(),
            merge_rules = merge_rules.len(),
            "CITROUS agency configured"
        );
        Self {
            service_filter,
            headsign_rules,
            merge_rules,
        }
    }
}

impl Default for CitrousAgency {
    fn default() -> Self {
        Self::new(AdapterConfig::default())
    }
}

impl AgencyTools for CitrousAgency {
    fn service_filter(&self) -> &ServiceFilter {
        &self.service_filter
    }

    fn agency_color(&self) -> &str {
        Self::AGENCY_COLOR
    }

    fn agency_route_type(&self) -> RouteType {
        RouteType::Bus
    }

    fn route_id(&self, route: &Route) -> Result<u64, AdapterError> {
        routes::resolve_route_id(&route.route_short_name)
    }

    fn route_short_name(&self, route: &Route) -> String {
        routes::route_short_name(route)
    }

    fn route_long_name(&self, route: &Route) -> String {
        routes::route_long_name(route)
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        headsigns::clean_trip_headsign(headsign)
    }

    fn clean_direction_headsign(&self, _from_stop_name: bool, headsign: &str) -> String {
        match headsigns::time_of_day(headsign) {
            Some(token) => token.to_string(),
            None => self.clean_trip_headsign(headsign),
        }
    }

    fn clean_stop_name(&self, name: &str) -> String {
        stops::clean_stop_name(name)
    }

    fn stop_id(&self, stop: &Stop) -> Result<u32, AdapterError> {
        stops::stop_id(stop)
    }

    fn trip_headsign(&self, route_id: u64, trip: &Trip) -> TripHeadsign {
        headsigns::assign(&self.headsign_rules, route_id, trip)
    }

    fn merge_headsigns(
        &self,
        headsign: &TripHeadsign,
        to_merge: &TripHeadsign,
    ) -> Result<String, AdapterError> {
        headsigns::merge(&self.merge_rules, headsign, to_merge)
    }

    // Same trips run under both direction IDs on the tagged routes.
    fn direction_finder_enabled(&self, route_id: u64) -> bool {
        !self
            .headsign_rules
            .iter()
            .any(|rule| rule.route_id() == route_id && rule.disables_direction_finder())
    }
}
