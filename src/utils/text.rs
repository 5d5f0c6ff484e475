//! Text normalization helpers

/// Upper-case the first character, lower-case the rest
///
/// "mALE" → "Male"
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Upper-case every letter that follows a non-letter, lower-case the others
///
/// "high school" → "High School", "2n cycle" → "2N Cycle"
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}

/// Purchase indicator: true iff the value is "yes" or "1", any casing
///
/// Surrounding whitespace is trimmed first, so " yes " is a purchase.
pub fn is_purchase(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim();
            v.eq_ignore_ascii_case("yes") || v == "1"
        }
        None => false,
    }
}
