//! Stop name cleanup and stop IDs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::clean::{Rule, clean_label_fr, clean_street_types_fr_ca, normalize_case};
use crate::error::AdapterError;
use crate::model::Stop;

lazy_static! {
    // A run of filler words ("face face", "face au ... face") is one match.
    static ref FACING: Rule = Rule::new(
        Regex::new(
            r"(?i)(?:^|\s+)face(?:\s+(?:à|a\x{300}|au))?(?:\s+face(?:\s+(?:à|a\x{300}|au))?)*\s+"
        )
        .unwrap(),
        " ",
    );
    static ref IN_FRONT_OF: Rule =
        Rule::new(Regex::new(r"(?i)(?:^|\s+)devant(?:\s+devant)*\s+").unwrap(), " ");
}

/// Cleans a raw stop name.
pub fn clean_stop_name(name: &str) -> String {
    let name = clean_street_types_fr_ca(&normalize_case(name));
    let name = FACING.apply(&name);
    let name = IN_FRONT_OF.apply(&name);
    clean_label_fr(&name)
}

/// The stop code doubles as the stop ID.
///
/// # Errors
///
/// Returns [`AdapterError::InvalidStopCode`] when the code is missing or not
/// a number.
pub fn stop_id(stop: &Stop) -> Result<u32, AdapterError> {
    stop.stop_code
        .as_deref()
        .and_then(|code| code.trim().parse().ok())
        .ok_or_else(|| AdapterError::InvalidStopCode {
            stop_id: stop.stop_id.clone(),
            code: stop.stop_code.clone(),
        })
}
