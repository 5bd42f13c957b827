//! Route IDs and route names.
//!
//! CITROUS short names are numbers, except a few prefixed ones ("T-34"). A
//! route ID is the number itself, or the number offset by
//! [`RID_STARTS_WITH_T`] for the "T" routes so both families never collide.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::agency::AgencyTools;
use crate::clean::{clean_label_fr, normalize_case, replace_saint};
use crate::error::AdapterError;
use crate::model::{Route, RouteSummary};

pub const RID_STARTS_WITH_T: u64 = 20_000;

const T: &str = "T";
const RSN_115_37: &str = "115-37";
const RLN_115: &str = "115";
const RSN_37: &str = "37";
const RSN_T_34: &str = "T-34";
const RSN_T34: &str = "T34";

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();
}

/// Route ID for a GTFS short name.
///
/// # Errors
///
/// Returns [`AdapterError::UnresolvableRouteId`] when the short name is
/// neither a number nor a known prefix followed by a number.
pub fn resolve_route_id(short_name: &str) -> Result<u64, AdapterError> {
    let unresolvable = || AdapterError::UnresolvableRouteId {
        short_name: short_name.to_string(),
    };
    if !short_name.is_empty() && short_name.bytes().all(|b| b.is_ascii_digit()) {
        return short_name.parse().map_err(|_| unresolvable());
    }
    if let Some(digits) = DIGITS.find(short_name) {
        if short_name.starts_with(T) {
            let digits: u64 = digits.as_str().parse().map_err(|_| unresolvable())?;
            return RID_STARTS_WITH_T
                .checked_add(digits)
                .ok_or_else(unresolvable);
        }
    }
    warn!(short_name, "Unexpected route ID");
    Err(unresolvable())
}

/// Short name shown to riders.
pub fn route_short_name(route: &Route) -> String {
    match route.route_short_name.as_str() {
        RSN_T_34 => RSN_T34.to_string(),
        RSN_115_37 => RSN_37.to_string(),
        short_name => short_name.to_string(),
    }
}

/// Long name shown to riders.
///
/// "115-37" is published as route 37; its long name keeps the 115 part.
pub fn route_long_name(route: &Route) -> String {
    let long_name = clean_label_fr(&replace_saint(&normalize_case(
        route.long_name_or_default(),
    )));
    if route.route_short_name != RSN_115_37 || has_prefix_115(&long_name) {
        return long_name;
    }
    if long_name.is_empty() {
        RLN_115.to_string()
    } else {
        clean_label_fr(&format!("{RLN_115} {long_name}"))
    }
}

fn has_prefix_115(long_name: &str) -> bool {
    long_name
        .strip_prefix(RLN_115)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
}

/// Resolves every route of a feed through `agency`, sorted by route ID.
///
/// # Errors
///
/// Fails on the first route whose ID cannot be resolved, and when two short
/// names resolve to the same ID.
pub fn resolve_route_table<A>(
    agency: &A,
    routes: &[Route],
) -> Result<Vec<RouteSummary>, AdapterError>
where
    A: AgencyTools + ?Sized,
{
    let mut table: BTreeMap<u64, RouteSummary> = BTreeMap::new();
    for route in routes {
        let route_id = agency.route_id(route)?;
        if let Some(existing) = table.get(&route_id) {
            if existing.gtfs_short_name != route.route_short_name {
                return Err(AdapterError::DuplicateRouteId {
                    route_id,
                    first: existing.gtfs_short_name.clone(),
                    second: route.route_short_name.clone(),
                });
            }
            continue;
        }
        let summary = RouteSummary {
            gtfs_short_name: route.route_short_name.clone(),
            route_id,
            short_name: agency.route_short_name(route),
            long_name: agency.route_long_name(route),
        };
        debug!(route_id, short_name = %summary.short_name, "Route resolved");
        table.insert(route_id, summary);
    }
    Ok(table.into_values().collect())
}
