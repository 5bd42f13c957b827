//! Text cleanup shared by route, trip and stop labels.
//!
//! A cleanup is an ordered table of [`Rule`]s folded over the input: each
//! rule rewrites the output of the previous one. Tables are compiled once in
//! `lazy_static!` blocks and never fail at runtime; a rule that does not
//! match leaves the text untouched.

mod label;
mod street;

pub use label::{clean_label_fr, normalize_case, replace_saint};
pub use street::{clean_street_types_fr_ca, normalize_segments, remove_via};

use regex::Regex;

/// Marker between the "from" and "to" legs of a label.
pub const SEGMENT_SEPARATOR: &str = " - ";

/// A compiled pattern and what its matches become.
///
/// The replacement follows `regex` expansion syntax (`$1`, `${name}`).
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    pub fn new(pattern: Regex, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

/// Runs every rule in order, each on the previous output.
pub fn apply_rules(rules: &[Rule], text: &str) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

/// Builds an accent and case insensitive whole-word pattern.
///
/// Accented vowels match their bare letter and their decomposed form (base
/// letter followed by a combining accent), and hyphens match a hyphen or a
/// space.
pub fn words_pattern(word: &str) -> Regex {
    let mut pattern = String::from(r"(?i)\b");
    for c in word.chars() {
        match c.to_lowercase().next().unwrap_or(c) {
            'a' | 'à' | 'â' => pattern.push_str("(?:[aàâ]|a[\u{300}\u{302}])"),
            'e' | 'é' | 'è' | 'ê' | 'ë' => {
                pattern.push_str("(?:[eéèêë]|e[\u{300}-\u{302}\u{308}])")
            }
            'o' | 'ô' => pattern.push_str("(?:[oô]|o\u{302})"),
            '-' => pattern.push_str(r"[-\s]"),
            c => pattern.push_str(&regex::escape(&c.to_string())),
        }
    }
    pattern.push_str(r"\b");
    Regex::new(&pattern).expect("literal word pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_apply_in_order() {
        let rules = vec![
            Rule::new(Regex::new("a").unwrap(), "b"),
            Rule::new(Regex::new("b").unwrap(), "c"),
        ];
        assert_eq!(apply_rules(&rules, "ab"), "cc");
    }

    #[test]
    fn test_empty_table_is_identity() {
        assert_eq!(apply_rules(&[], "Gare Delson"), "Gare Delson");
    }

    #[test]
    fn test_words_pattern_ignores_accents_and_case() {
        let re = words_pattern("andré-laurendeau");
        assert!(re.is_match("Cégep André-Laurendeau"));
        assert!(re.is_match("cegep andre laurendeau"));
        assert!(re.is_match("ANDRE\u{301}-LAURENDEAU"));
        assert!(!re.is_match("Andrée-Laurendeau"));
    }

    #[test]
    fn test_words_pattern_matches_whole_words_only() {
        let re = words_pattern("montpetit");
        assert!(!re.is_match("Montpetitville"));
        assert!(re.is_match("É-Montpetit"));
    }
}
