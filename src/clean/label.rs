use lazy_static::lazy_static;
use regex::Regex;

use super::{Rule, apply_rules};

lazy_static! {
    static ref SAINT: Vec<Rule> = vec![
        Rule::new(Regex::new(r"(?i)\bsainte\b").unwrap(), "Ste"),
        Rule::new(Regex::new(r"(?i)\bsaint\b").unwrap(), "St"),
    ];
    static ref SPACING: Vec<Rule> = vec![
        Rule::new(Regex::new(r"\s+").unwrap(), " "),
        Rule::new(Regex::new(r"\(\s+").unwrap(), "("),
        Rule::new(Regex::new(r"\s+\)").unwrap(), ")"),
        Rule::new(Regex::new(r"\s+,").unwrap(), ","),
        Rule::new(Regex::new(r"^[\s\-–—,;:/]+").unwrap(), ""),
        Rule::new(Regex::new(r"[\s\-–—,;:/]+$").unwrap(), ""),
    ];
}

/// Abbreviates whole-word "Saint"/"Sainte" to "St"/"Ste".
pub fn replace_saint(text: &str) -> String {
    apply_rules(&SAINT, text)
}

/// Final cleanup applied to every French label.
///
/// Collapses whitespace, drops stray separators at both ends, title-cases
/// labels typed in capitals, abbreviates saint names and upper-cases the
/// first letter. Idempotent.
pub fn clean_label_fr(label: &str) -> String {
    let label = normalize_case(&apply_rules(&SPACING, label));
    upper_first(&replace_saint(&label))
}

/// Title-cases a label typed in capitals, leaves anything else alone.
pub fn normalize_case(label: &str) -> String {
    if is_shouting(label) {
        title_case(label)
    } else {
        label.to_string()
    }
}

// Short all-caps tokens (AM, PM, T34) are codes, not shouting.
fn is_shouting(label: &str) -> bool {
    !label.chars().any(char::is_lowercase)
        && label.chars().filter(|c| c.is_uppercase()).count() > 3
}

fn title_case(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    let mut word_start = true;
    for c in label.chars() {
        if c.is_alphabetic() {
            if word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            result.push(c);
            word_start = !c.is_alphanumeric();
        }
    }
    result
}

fn upper_first(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_label_collapses_whitespace_and_trims() {
        assert_eq!(clean_label_fr("  Gare   Delson  "), "Gare Delson");
        assert_eq!(clean_label_fr("- Gare Delson -"), "Gare Delson");
        assert_eq!(clean_label_fr("Terminus ( Centre-ville )"), "Terminus (Centre-ville)");
    }

    #[test]
    fn test_clean_label_title_cases_capitals() {
        assert_eq!(
            clean_label_fr("CÉGEP ANDRÉ-LAURENDEAU"),
            "Cégep André-Laurendeau"
        );
        assert_eq!(clean_label_fr("L'ÉGLISE"), "L'Église");
        assert_eq!(clean_label_fr("PM"), "PM");
        assert_eq!(clean_label_fr("T34"), "T34");
    }

    #[test]
    fn test_normalize_case_keeps_mixed_case() {
        assert_eq!(normalize_case("MONTÉE SAINT-RÉGIS"), "Montée Saint-Régis");
        assert_eq!(normalize_case("rue de l'ÉGLISE"), "rue de l'ÉGLISE");
    }

    #[test]
    fn test_saint_names() {
        assert_eq!(clean_label_fr("saint-constant"), "St-constant");
        assert_eq!(clean_label_fr("SAINTE-CATHERINE"), "Ste-Catherine");
        assert_eq!(replace_saint("Rue Saint-Pierre"), "Rue St-Pierre");
        assert_eq!(replace_saint("Saintonge"), "Saintonge");
    }

    #[test]
    fn test_clean_label_is_idempotent() {
        for raw in [
            "  MÉTRO  ANGRIGNON ",
            "saint-jean , (nord )",
            "123 av. Principale",
            "",
        ] {
            let once = clean_label_fr(raw);
            assert_eq!(clean_label_fr(&once), once, "input {raw:?}");
        }
    }
}
