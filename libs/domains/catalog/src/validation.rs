//! Pure validation predicates shared across the catalog domain.
//!
//! Every function here is synchronous and side-effect free: same input,
//! same answer, no I/O and no shared mutable state. The regexes are
//! compiled once and reused.

use mongodb::bson::oid::ObjectId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use crate::models::Size;

static ALPHABETIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z ]*$").expect("valid alphabetic regex"));

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z ]{1,29}$").expect("valid name regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+91|0)?[6-9][0-9]{9}$").expect("valid phone regex"));

static PINCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]{5}$").expect("valid pincode regex"));

/// True iff the optional input holds a value.
pub fn is_present<T>(value: &Option<T>) -> bool {
    value.is_some()
}

/// True iff the string contains at least one non-whitespace character.
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Parse the string as a finite floating-point number.
///
/// Accepts integers, decimals, signs and exponent notation (`"1e3"`);
/// rejects NaN and the infinities.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// True iff the string parses as a finite floating-point number.
pub fn is_numeric(value: &str) -> bool {
    parse_number(value).is_some()
}

/// True iff the string is a well-formed 24-char hex document id.
pub fn is_valid_object_id(value: &str) -> bool {
    ObjectId::parse_str(value).is_ok()
}

/// True iff the string is exactly one of the size codes. Case-sensitive,
/// no trimming.
pub fn is_valid_size(value: &str) -> bool {
    Size::from_str(value).is_ok()
}

/// Parse a comma-separated size list as received from the create form.
///
/// Tokens are upper-cased but not trimmed, so `"s,m"` parses and `"s, m"`
/// does not. Returns `None` if any token is not a size code (an empty
/// input has one empty token and therefore fails too).
pub fn parse_sizes(raw: &str) -> Option<Vec<Size>> {
    raw.split(',')
        .map(|token| Size::from_str(&token.to_uppercase()).ok())
        .collect()
}

/// True iff the trimmed string is non-empty and consists of letters and
/// spaces only.
pub fn is_alphabetic(value: &str) -> bool {
    ALPHABETIC_RE.is_match(value.trim())
}

/// Parse a boolean from its string form, case-insensitively.
pub fn parse_boolean(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// True iff the string equals `true` or `false` case-insensitively.
pub fn is_valid_boolean_string(value: &str) -> bool {
    parse_boolean(value).is_some()
}

/// True iff the string is a personal name: letters and spaces, 2 to 30
/// characters, starting with a letter.
pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

/// True iff the string has the conventional `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// True iff the string is a usable password: 8 to 15 characters from the
/// alphanumeric-plus-special set, with at least one lowercase letter, one
/// uppercase letter, one digit and one special character.
pub fn is_valid_password(value: &str) -> bool {
    const SPECIALS: &str = "!@#$%^&*";

    let length = value.chars().count();
    if !(8..=15).contains(&length) {
        return false;
    }

    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c));

    allowed
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| SPECIALS.contains(c))
}

/// True iff the string is an Indian mobile number: optional `+91`/`0`
/// prefix, then ten digits starting 6-9.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// True iff the string is a six-digit Indian postal code with a non-zero
/// first digit.
pub fn is_valid_pincode(value: &str) -> bool {
    PINCODE_RE.is_match(value)
}

/// Trim and collapse every internal whitespace run to a single space.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace and lowercase. Idempotent, never produces leading
/// or trailing whitespace.
pub fn normalize_text(value: &str) -> String {
    collapse_whitespace(value).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_present() {
        assert!(is_present(&Some("x")));
        assert!(is_present(&Some(String::new())));
        assert!(!is_present::<String>(&None));
    }

    #[test]
    fn test_is_valid_string_rejects_blank() {
        assert!(is_valid_string("shirt"));
        assert!(is_valid_string("  shirt  "));
        assert!(!is_valid_string(""));
        assert!(!is_valid_string("   "));
        assert!(!is_valid_string("\t\n"));
    }

    #[test]
    fn test_parse_number_accepts_finite_floats() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(" 25.5 "), Some(25.5));
    }

    #[test]
    fn test_parse_number_rejects_non_numbers() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-inf"), None);
    }

    #[test]
    fn test_is_valid_object_id_checks_length_and_hex() {
        assert!(is_valid_object_id("64f1c0a2e4b0a1b2c3d4e5f6"));
        assert!(!is_valid_object_id("64f1c0a2e4b0a1b2c3d4e5f")); // 23 chars
        assert!(!is_valid_object_id("64f1c0a2e4b0a1b2c3d4e5f67")); // 25 chars
        assert!(!is_valid_object_id("64f1c0a2e4b0a1b2c3d4e5zz"));
        assert!(!is_valid_object_id(""));
    }

    #[test]
    fn test_is_valid_size_is_exact() {
        for code in ["S", "XS", "M", "X", "L", "XXL", "XL"] {
            assert!(is_valid_size(code), "{code} should be a size");
        }
        assert!(!is_valid_size("s"));
        assert!(!is_valid_size(" M"));
        assert!(!is_valid_size("M "));
        assert!(!is_valid_size("Q"));
        assert!(!is_valid_size(""));
    }

    #[test]
    fn test_parse_sizes_uppercases_tokens() {
        assert_eq!(parse_sizes("s,m"), Some(vec![Size::S, Size::M]));
        assert_eq!(parse_sizes("XL"), Some(vec![Size::XL]));
        assert_eq!(
            parse_sizes("xs,xxl,l"),
            Some(vec![Size::XS, Size::XXL, Size::L])
        );
    }

    #[test]
    fn test_parse_sizes_does_not_trim() {
        assert_eq!(parse_sizes("s, m"), None);
        assert_eq!(parse_sizes(" s"), None);
    }

    #[test]
    fn test_parse_sizes_rejects_unknown_and_empty() {
        assert_eq!(parse_sizes("s,q"), None);
        assert_eq!(parse_sizes(""), None);
        assert_eq!(parse_sizes("s,,m"), None);
    }

    #[test]
    fn test_parse_sizes_preserves_order() {
        assert_eq!(
            parse_sizes("xl,s,m"),
            Some(vec![Size::XL, Size::S, Size::M])
        );
    }

    #[test]
    fn test_is_alphabetic() {
        assert!(is_alphabetic("Casual"));
        assert!(is_alphabetic("Round Neck"));
        assert!(is_alphabetic("  Round Neck  "));
        assert!(!is_alphabetic("V-Neck"));
        assert!(!is_alphabetic("Style 2"));
        assert!(!is_alphabetic(""));
        assert!(!is_alphabetic("   "));
    }

    #[test]
    fn test_parse_boolean_is_case_insensitive() {
        assert_eq!(parse_boolean("true"), Some(true));
        assert_eq!(parse_boolean("TRUE"), Some(true));
        assert_eq!(parse_boolean("False"), Some(false));
        assert_eq!(parse_boolean("yes"), None);
        assert_eq!(parse_boolean("1"), None);
        assert_eq!(parse_boolean(""), None);
        assert!(is_valid_boolean_string("tRuE"));
        assert!(!is_valid_boolean_string("on"));
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("Jo"));
        assert!(is_valid_name("Asha Rao"));
        assert!(!is_valid_name("A")); // too short
        assert!(!is_valid_name(&"a".repeat(31))); // too long
        assert!(!is_valid_name(" Asha"));
        assert!(!is_valid_name("As4a"));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
        assert!(is_valid_email("a_b-c@d.io"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user example@x.com"));
    }

    #[test]
    fn test_is_valid_password() {
        assert!(is_valid_password("Abcdef1!"));
        assert!(is_valid_password("Str0ng@Passw"));
        assert!(!is_valid_password("Ab1!")); // too short
        assert!(!is_valid_password("Abcdefgh1!abcdef")); // 16 chars
        assert!(!is_valid_password("abcdefg1!")); // no uppercase
        assert!(!is_valid_password("ABCDEFG1!")); // no lowercase
        assert!(!is_valid_password("Abcdefgh!")); // no digit
        assert!(!is_valid_password("Abcdefgh1")); // no special
        assert!(!is_valid_password("Abcdef 1!")); // space not allowed
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+919876543210"));
        assert!(is_valid_phone("09876543210"));
        assert!(!is_valid_phone("5876543210")); // starts below 6
        assert!(!is_valid_phone("987654321")); // 9 digits
        assert!(!is_valid_phone("98765432100")); // 11 digits
    }

    #[test]
    fn test_is_valid_pincode() {
        assert!(is_valid_pincode("560001"));
        assert!(!is_valid_pincode("060001")); // leading zero
        assert!(!is_valid_pincode("56001")); // 5 digits
        assert!(!is_valid_pincode("5600011")); // 7 digits
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Red   Shirt "), "Red Shirt");
        assert_eq!(collapse_whitespace("one\t\ntwo"), "one two");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_normalize_text_lowercases_and_collapses() {
        assert_eq!(normalize_text("  Red  Shirt "), "red shirt");
        assert_eq!(normalize_text("RED\tSHIRT"), "red shirt");
    }

    #[test]
    fn test_normalize_text_is_idempotent() {
        for input in ["  Red  Shirt ", "already normal", "MiXeD   CaSe\n"] {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once);
        }
    }
}
