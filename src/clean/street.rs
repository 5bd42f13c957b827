use lazy_static::lazy_static;
use regex::Regex;

use super::{Rule, apply_rules, words_pattern};

lazy_static! {
    static ref STREET_TYPES_FR_CA: Vec<Rule> = vec![
        Rule::new(words_pattern("avenue"), "av."),
        Rule::new(words_pattern("boulevard"), "boul."),
        Rule::new(words_pattern("chemin"), "ch."),
        Rule::new(words_pattern("croissant"), "crois."),
        Rule::new(words_pattern("montée"), "mtée"),
        Rule::new(words_pattern("place"), "pl."),
        Rule::new(words_pattern("promenade"), "prom."),
        Rule::new(words_pattern("terrasse"), "tsse"),
    ];
    static ref VIA: Rule = Rule::new(Regex::new(r"(?i)\s+via\s.*$").unwrap(), "");
    // Spaced hyphens and any en/em dash separate legs; "A-Laurendeau" does not.
    static ref SEGMENTS: Rule = Rule::new(
        Regex::new(r"\s*[–—]\s*|\s+-\s*|\s*-\s+").unwrap(),
        super::SEGMENT_SEPARATOR,
    );
}

/// Abbreviates French-Canadian street types.
pub fn clean_street_types_fr_ca(text: &str) -> String {
    apply_rules(&STREET_TYPES_FR_CA, text)
}

/// Drops a trailing "via ..." clause.
pub fn remove_via(text: &str) -> String {
    VIA.apply(text)
}

/// Rewrites leg separators to [`super::SEGMENT_SEPARATOR`].
pub fn normalize_segments(text: &str) -> String {
    SEGMENTS.apply(text)
}
