//! Trip headsign cleanup, assignment and merge policy.
//!
//! Routes 200 and 210 run the same headsign text in both directions, so the
//! default rules tag those headsigns with their direction. Merges are only
//! accepted for the pairs listed in [`MergeRule`]s; anything else is a new
//! ambiguity in the feed and stops the run.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clean::{
    Rule, apply_rules, clean_label_fr, clean_street_types_fr_ca, normalize_case,
    normalize_segments, remove_via, words_pattern,
};
use crate::error::AdapterError;
use crate::model::{Trip, TripHeadsign};

pub const AM: &str = "AM";
pub const PM: &str = "PM";

lazy_static! {
    static ref DIRECTION: Rule = Rule::new(Regex::new(r"(?i)\bdirection\s+").unwrap(), "");
    static ref TIME_OF_DAY: Regex = Regex::new(r"(?i)\s*\b(AM|PM)\s*$").unwrap();
    static ref PLACE_NAMES: Vec<Rule> = vec![
        Rule::new(words_pattern("andré-laurendeau"), "A-Laurendeau"),
        Rule::new(words_pattern("édouard-montpetit"), "É-Montpetit"),
    ];
}

/// How a configured route overrides the default headsign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadsignRule {
    /// Fixed label per direction, whatever the feed says.
    Fixed {
        route_id: u64,
        labels: BTreeMap<u8, String>,
    },
    /// Cleaned headsign suffixed with the direction when the raw text is one
    /// of `raw`.
    TagDirection { route_id: u64, raw: Vec<String> },
}

impl HeadsignRule {
    pub fn route_id(&self) -> u64 {
        match self {
            HeadsignRule::Fixed { route_id, .. } | HeadsignRule::TagDirection { route_id, .. } => {
                *route_id
            }
        }
    }

    /// The routes whose direction is tagged by hand rather than guessed.
    pub fn disables_direction_finder(&self) -> bool {
        matches!(self, HeadsignRule::TagDirection { .. })
    }

    fn label_for(&self, raw: &str, direction: u8) -> Option<String> {
        match self {
            HeadsignRule::Fixed { labels, .. } => labels.get(&direction).cloned(),
            HeadsignRule::TagDirection { raw: texts, .. } => texts
                .iter()
                .any(|text| text == raw)
                .then(|| format!("{} {}", clean_trip_headsign(raw), direction)),
        }
    }
}

/// Known ambiguity: two trips of `route_id` in `direction` merge under `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRule {
    pub route_id: u64,
    pub direction: u8,
    pub label: String,
}

/// Rules of the current feed revision.
pub fn default_rules() -> Vec<HeadsignRule> {
    vec![
        HeadsignRule::TagDirection {
            route_id: 200,
            raw: vec![
                "Métro Angrignon - Cégep André-Laurendeau".to_string(),
                "Angrignon - André-Laurendeau".to_string(),
            ],
        },
        HeadsignRule::TagDirection {
            route_id: 210,
            raw: vec![
                "Métro Longueuil - Cégep É-Montpetit".to_string(),
                "Longueuil - Édouard-Montpetit".to_string(),
            ],
        },
    ]
}

/// Cleans a raw trip headsign.
pub fn clean_trip_headsign(headsign: &str) -> String {
    let headsign = DIRECTION.apply(&normalize_case(headsign));
    let headsign = strip_time_of_day(&headsign);
    let headsign = apply_rules(&PLACE_NAMES, &headsign);
    let headsign = normalize_segments(&headsign);
    let headsign = remove_via(&headsign);
    let headsign = clean_street_types_fr_ca(&headsign);
    clean_label_fr(&headsign)
}

/// `AM` or `PM` when the text ends with that token.
pub fn time_of_day(text: &str) -> Option<&'static str> {
    let token = TIME_OF_DAY.captures(text)?.get(1)?.as_str();
    if token.eq_ignore_ascii_case(AM) {
        Some(AM)
    } else {
        Some(PM)
    }
}

// A headsign made of the token alone keeps it.
fn strip_time_of_day(text: &str) -> String {
    let stripped = TIME_OF_DAY.replace(text, "");
    if stripped.trim().is_empty() {
        text.to_string()
    } else {
        stripped.into_owned()
    }
}

/// Picks the headsign of `trip` on the route resolved to `route_id`.
pub fn assign(rules: &[HeadsignRule], route_id: u64, trip: &Trip) -> TripHeadsign {
    let raw = trip.headsign_or_default();
    let direction = trip.direction();
    let overridden = rules
        .iter()
        .filter(|rule| rule.route_id() == route_id)
        .find_map(|rule| rule.label_for(raw, direction));
    let label = match overridden {
        Some(label) => {
            debug!(route_id, direction, raw, label = %label, "Headsign overridden");
            label
        }
        None => clean_trip_headsign(raw),
    };
    TripHeadsign {
        route_id,
        direction,
        label,
    }
}

/// Resolves two headsigns the framework wants to fold into one trip.
///
/// # Errors
///
/// Returns [`AdapterError::UnexpectedMerge`] unless the labels already agree
/// or a [`MergeRule`] covers their route and direction.
pub fn merge(
    rules: &[MergeRule],
    headsign: &TripHeadsign,
    to_merge: &TripHeadsign,
) -> Result<String, AdapterError> {
    let same_group =
        headsign.route_id == to_merge.route_id && headsign.direction == to_merge.direction;
    if same_group {
        if headsign.label == to_merge.label {
            return Ok(headsign.label.clone());
        }
        if let Some(rule) = rules
            .iter()
            .find(|r| r.route_id == headsign.route_id && r.direction == headsign.direction)
        {
            debug!(
                route_id = rule.route_id,
                direction = rule.direction,
                label = %rule.label,
                "Merged headsigns"
            );
            return Ok(rule.label.clone());
        }
    }
    warn!(
        route_id = headsign.route_id,
        direction = headsign.direction,
        label = %headsign.label,
        label_to_merge = %to_merge.label,
        "Unexpected trips to merge"
    );
    Err(AdapterError::UnexpectedMerge {
        route_id: headsign.route_id,
        direction: headsign.direction,
        label: headsign.label.clone(),
        label_to_merge: to_merge.label.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(headsign: &str, direction: u8) -> Trip {
        Trip {
            route_id: "R".to_string(),
            service_id: "S".to_string(),
            trip_id: "T".to_string(),
            trip_headsign: Some(headsign.to_string()),
            direction_id: Some(direction),
        }
    }

    fn headsign(route_id: u64, direction: u8, label: &str) -> TripHeadsign {
        TripHeadsign {
            route_id,
            direction,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_clean_strips_direction_word() {
        assert_eq!(clean_trip_headsign("Direction Gare Delson"), "Gare Delson");
        assert_eq!(clean_trip_headsign("direction   Candiac"), "Candiac");
    }

    #[test]
    fn test_clean_strips_trailing_time_of_day() {
        assert_eq!(clean_trip_headsign("Gare Delson AM"), "Gare Delson");
        assert_eq!(clean_trip_headsign("Gare Delson pm"), "Gare Delson");
        assert_eq!(clean_trip_headsign("Rue Adam"), "Rue Adam");
        assert_eq!(clean_trip_headsign("AM"), "AM");
    }

    #[test]
    fn test_clean_abbreviates_place_names() {
        assert_eq!(
            clean_trip_headsign("Métro Angrignon - Cégep André-Laurendeau"),
            "Métro Angrignon - Cégep A-Laurendeau"
        );
        assert_eq!(
            clean_trip_headsign("Longueuil – Edouard Montpetit"),
            "Longueuil - É-Montpetit"
        );
    }

    #[test]
    fn test_clean_removes_via_and_street_types() {
        assert_eq!(
            clean_trip_headsign("Candiac via boulevard Taschereau"),
            "Candiac"
        );
        assert_eq!(
            clean_trip_headsign("Terminus avenue Principale"),
            "Terminus av. Principale"
        );
    }

    #[test]
    fn test_time_of_day() {
        assert_eq!(time_of_day("Delson AM"), Some(AM));
        assert_eq!(time_of_day("Delson pm"), Some(PM));
        assert_eq!(time_of_day("Adam"), None);
        assert_eq!(time_of_day("Delson"), None);
    }

    #[test]
    fn test_assign_default_is_cleaned_text() {
        let h = assign(&default_rules(), 33, &trip("Direction Gare Delson", 1));
        assert_eq!(h, headsign(33, 1, "Gare Delson"));
    }

    #[test]
    fn test_assign_tags_direction_on_shared_text() {
        let rules = default_rules();
        let outbound = assign(&rules, 200, &trip("Angrignon - André-Laurendeau", 0));
        let inbound = assign(&rules, 200, &trip("Angrignon - André-Laurendeau", 1));
        assert_eq!(outbound.label, "Angrignon - A-Laurendeau 0");
        assert_eq!(inbound.label, "Angrignon - A-Laurendeau 1");

        let other = assign(&rules, 200, &trip("Gare Delson", 1));
        assert_eq!(other.label, "Gare Delson");
    }

    #[test]
    fn test_assign_fixed_ignores_raw_text() {
        let rules = vec![HeadsignRule::Fixed {
            route_id: 37,
            labels: BTreeMap::from([(0, "Stat Incitatif Georges-Gagné".to_string())]),
        }];
        let h = assign(&rules, 37, &trip("anything at all", 0));
        assert_eq!(h.label, "Stat Incitatif Georges-Gagné");
        // no label for this direction
        let h = assign(&rules, 37, &trip("Direction Delson", 1));
        assert_eq!(h.label, "Delson");
    }

    #[test]
    fn test_merge_same_label_is_not_ambiguous() {
        let a = headsign(33, 0, "Delson");
        assert_eq!(merge(&[], &a, &a.clone()).unwrap(), "Delson");
    }

    #[test]
    fn test_merge_allow_list() {
        let rules = vec![MergeRule {
            route_id: 200,
            direction: 1,
            label: "Delson".to_string(),
        }];
        let merged = merge(
            &rules,
            &headsign(200, 1, "Candiac"),
            &headsign(200, 1, "La Prairie"),
        );
        assert_eq!(merged.unwrap(), "Delson");
    }

    #[test]
    fn test_merge_unknown_pair_fails() {
        let err = merge(&[], &headsign(33, 0, "AM"), &headsign(33, 0, "PM")).unwrap_err();
        assert!(matches!(err, AdapterError::UnexpectedMerge { route_id: 33, .. }));

        let rules = vec![MergeRule {
            route_id: 33,
            direction: 0,
            label: "PM".to_string(),
        }];
        assert!(merge(&rules, &headsign(33, 0, "AM"), &headsign(33, 1, "PM")).is_err());
    }
}
