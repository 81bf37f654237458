//! Labels for the dating and place attribution tasks, derived from metadata.

/// Years added (`+`) or removed (`-`) for approximate dates.
const APPROXIMATION: i64 = 25;

fn is_null(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("null")
}

/// Turn a raw date field into a single-year label.
///
/// - `"-50±25"` -> `"-50"`
/// - `"100+"` -> `"125"`, `"-100-"` -> `"-125"`
/// - `"-200"` -> `"-200"`
/// - `"null"` or empty -> [None]
///
/// Anything else is kept verbatim.
pub fn date_label(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if is_null(raw) {
        return None;
    }

    if let Some((centre, spread)) = raw.split_once('±') {
        if let (Ok(centre), Ok(_)) = (centre.parse::<i64>(), spread.parse::<u32>()) {
            return Some(centre.to_string());
        }
    }
    if let Some(Ok(year)) = raw.strip_suffix('+').map(str::parse::<i64>) {
        return Some((year + APPROXIMATION).to_string());
    }
    if let Some(Ok(year)) = raw.strip_suffix('-').map(str::parse::<i64>) {
        return Some((year - APPROXIMATION).to_string());
    }
    if let Ok(year) = raw.parse::<i64>() {
        return Some(year.to_string());
    }

    Some(raw.to_string())
}

/// Turn a raw place field into a label, dropping a trailing parenthesized qualifier.
///
/// `"Oxyrhynchos (Bahnasa)"` -> `"Oxyrhynchos"`.
pub fn place_label(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if is_null(raw) {
        return None;
    }

    let label = match raw.find('(') {
        Some(idx) if idx > 0 && idx + 1 < raw.len() => raw[..idx].trim_end(),
        _ => raw,
    };

    Some(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        assert_eq!(date_label("-50±25").as_deref(), Some("-50"));
        assert_eq!(date_label("150±10").as_deref(), Some("150"));
        assert_eq!(date_label("100+").as_deref(), Some("125"));
        assert_eq!(date_label("-100+").as_deref(), Some("-75"));
        assert_eq!(date_label("100-").as_deref(), Some("75"));
        assert_eq!(date_label("-100-").as_deref(), Some("-125"));
        assert_eq!(date_label(" -200 ").as_deref(), Some("-200"));
        assert_eq!(date_label("212").as_deref(), Some("212"));
        assert_eq!(date_label("II–III AD").as_deref(), Some("II–III AD"));
        assert_eq!(date_label("null"), None);
        assert_eq!(date_label(""), None);
    }

    #[test]
    fn places() {
        assert_eq!(
            place_label("Oxyrhynchos (Bahnasa)").as_deref(),
            Some("Oxyrhynchos")
        );
        assert_eq!(place_label("Arsinoites").as_deref(), Some("Arsinoites"));
        assert_eq!(place_label("(unknown)").as_deref(), Some("(unknown)"));
        assert_eq!(place_label("Null"), None);
        assert_eq!(place_label("  "), None);
    }
}
