//! Item-code eligibility.

use stockfilter_core::CellValue;

use crate::ruleset::{PREFIX_LEN, RuleSet};

/// Decide whether an item code may be considered at all.
///
/// First match wins:
/// 1. non-text cells are ineligible;
/// 2. codes longer than 4 characters with a `.` at index 3 (`ABC.12`) are eligible;
/// 3. codes on the exact allow-list are eligible, whatever their length;
/// 4. everything else is ineligible.
///
/// Total over every [`CellValue`]; never fails.
pub fn is_eligible_code(code: &CellValue, rules: &RuleSet) -> bool {
    let Some(code) = code.as_text() else {
        return false;
    };
    has_dotted_prefix_shape(code) || rules.is_allowed_code(code)
}

fn has_dotted_prefix_shape(code: &str) -> bool {
    code.chars().count() > PREFIX_LEN + 1 && code.chars().nth(PREFIX_LEN) == Some('.')
}

/// First three characters of a text code, if it has at least that many.
pub fn code_prefix(code: &CellValue) -> Option<&str> {
    let code = code.as_text()?;
    if code.chars().count() < PREFIX_LEN {
        return None;
    }
    let end = code
        .char_indices()
        .nth(PREFIX_LEN)
        .map_or(code.len(), |(i, _)| i);
    Some(&code[..end])
}
