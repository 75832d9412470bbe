use rust_decimal::Decimal;
use std::str::FromStr;

/// True for cell contents that mean "no value".
pub fn is_empty_marker(s: &str) -> bool {
    let s = s.trim();
    s.is_empty()
        || s == "\"\""
        || s == "-"
        || s == "—"
        || s.eq_ignore_ascii_case("n/a")
        || s.eq_ignore_ascii_case("na")
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("none")
}

/// Parse a flash point cell into °C.
///
/// Handles formats like:
/// - "13" -> 13
/// - "-20 °C" -> -20
/// - "12,5" -> 12.5 (decimal comma)
/// - "approx. 40 C" -> 40
/// - "n/a", "" -> None
///
/// The first number in the cell wins. Returns None when nothing numeric
/// can be found.
pub fn parse_flash_point(s: &str) -> Option<Decimal> {
    if is_empty_marker(s) {
        return None;
    }
    let number = first_number(s)?;
    parse_decimal(&number)
}

/// Parse a decimal, accepting a decimal comma.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// Convert a JSON number to a Decimal without going through f64 rounding
/// where the textual form is exact.
pub fn decimal_from_json(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        serde_json::Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Extract the first signed decimal number appearing in `s`.
fn first_number(s: &str) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    let start = chars.iter().position(|c| c.is_ascii_digit())?;

    let mut out = String::new();
    if start > 0 && matches!(chars[start - 1], '-' | '−') {
        out.push('-');
    }

    let mut seen_separator = false;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            out.push(c);
        } else if (c == '.' || c == ',')
            && !seen_separator
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
        {
            seen_separator = true;
            out.push('.');
        } else {
            break;
        }
        i += 1;
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_flash_point("13"), Some(dec!(13)));
    }

    #[test]
    fn test_negative_with_unit() {
        assert_eq!(parse_flash_point("-20 °C"), Some(dec!(-20)));
        assert_eq!(parse_flash_point("−45°C"), Some(dec!(-45)));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_flash_point("12,5"), Some(dec!(12.5)));
        assert_eq!(parse_flash_point("22.99"), Some(dec!(22.99)));
    }

    #[test]
    fn test_text_before_number() {
        assert_eq!(parse_flash_point("approx. 40 C"), Some(dec!(40)));
        assert_eq!(parse_flash_point("closed cup 61 °C, open cup 66"), Some(dec!(61)));
    }

    #[test]
    fn test_empty_markers() {
        assert_eq!(parse_flash_point(""), None);
        assert_eq!(parse_flash_point("n/a"), None);
        assert_eq!(parse_flash_point("NULL"), None);
        assert_eq!(parse_flash_point("-"), None);
        assert_eq!(parse_flash_point("\"\""), None);
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(parse_flash_point("not flammable"), None);
    }

    #[test]
    fn test_decimal_from_json() {
        let v: serde_json::Value = serde_json::from_str("22.5").unwrap();
        assert_eq!(decimal_from_json(&v), Some(dec!(22.5)));
        let v: serde_json::Value = serde_json::from_str("-3").unwrap();
        assert_eq!(decimal_from_json(&v), Some(dec!(-3)));
        let v: serde_json::Value = serde_json::from_str("\"40,5\"").unwrap();
        assert_eq!(decimal_from_json(&v), Some(dec!(40.5)));
        assert_eq!(decimal_from_json(&serde_json::Value::Bool(true)), None);
    }
}
