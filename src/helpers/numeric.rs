use serde_json::Value;

/// Whether `text` reads as a decimal number: optional surrounding whitespace,
/// an optional sign, digits with an optional fraction and an optional exponent.
///
/// `"42"`, `" -1.5"`, `".5"`, `"1e3"` are numeric, `"0x1A"`, `"1 2"`, `"."` and `""` are not.
pub fn is_numeric_str(text: &str) -> bool {
    let text = text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Whether the value is a JSON number or a numeric string
pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(text) => is_numeric_str(text),
        _ => false,
    }
}

/// Integer reading of a numeric value, `None` for anything else.
///
/// Fractions truncate toward zero and out of range values saturate.
pub fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64)),
        Value::String(text) if is_numeric_str(text) => {
            let text = text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|float| float as i64))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recognizes_numeric_strings() {
        for text in ["0", "42", "-7", "+3", "1.5", ".5", "5.", "1e3", "2.5E-2", " 12 ", "\n9"] {
            assert!(is_numeric_str(text), "{text:?} should be numeric");
        }
    }

    #[test]
    fn rejects_non_numeric_strings() {
        for text in ["", " ", ".", "-", "abc", "12abc", "0x1A", "1 2", "1e", "e5", "--1", "1.2.3"] {
            assert!(!is_numeric_str(text), "{text:?} should not be numeric");
        }
    }

    #[test]
    fn converts_to_int() {
        assert_eq!(to_int(&json!(632910392)), Some(632910392));
        assert_eq!(to_int(&json!("632910392")), Some(632910392));
        assert_eq!(to_int(&json!("199.99")), Some(199));
        assert_eq!(to_int(&json!(-2.7)), Some(-2));
        assert_eq!(to_int(&json!("1e3")), Some(1000));
        assert_eq!(to_int(&json!(u64::MAX)), Some(i64::MAX));
        assert_eq!(to_int(&json!("IPod Nano")), None);
        assert_eq!(to_int(&json!(true)), None);
        assert_eq!(to_int(&json!(null)), None);
    }
}
