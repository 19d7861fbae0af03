use regex::Regex;
use std::sync::LazyLock;

use super::{first_match, Rule};

static NAMED_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:gate|access|door|entry|lock)\s*code(?:\s*(?:is|:))?\s*#?(?P<code>\d{4,8})\b")
        .unwrap()
});

static PIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bpin(?:\s*(?:is|:))?\s*#?(?P<code>\d{4,8})\b").unwrap());

static HASH_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(?P<code>\d{4,8})\b").unwrap());

static DIGIT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<code>\d{4,8})\b").unwrap());

// Prefix is case-insensitive; the code itself must be uppercase/digits.
static CONFIRMATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:confirmation(?:\s+(?:code|number))?(?:\s*(?:is|:))?\s*#?)(?P<code>[A-Z0-9]{6})\b")
        .unwrap()
});

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(?P<amount>\d{1,3}(?:,\d{3})*(?:\.\d{2})?)").unwrap());

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<phone>\(?\d{3}\)?[-.\s]\d{3}[-.\s]\d{4})\b").unwrap()
});

static LISTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<beds>\d+)\s*(?:bed(?:room)?s?|br|bd)\b[\s\S]{0,60}?\$(?P<price>\d{1,3}(?:,\d{3})*)")
        .unwrap()
});

static LIKES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?P<count>\d[\d,]*)\s+likes?\b").unwrap());

static COMMENTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?P<count>\d[\d,]*)\s+comments?\b").unwrap());

static UPS_TRACKING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<tracking>1Z[0-9A-Z]{16})\b").unwrap());

static NAMED_TRACKING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:tracking\s*(?:number|no\.?|#)?\s*(?:is|:)?\s*)(?P<tracking>[0-9A-Z]{10,26})\b")
        .unwrap()
});

static DIGIT_TRACKING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?P<tracking>\d{12,22})\b").unwrap());

static FLIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:flight\s+)(?P<flight>[A-Z]{1,2}\s?\d{2,4})\b").unwrap());

static INVOICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:invoice\s*(?:no\.?|number|#)?\s*:?\s*)(?P<num>[A-Z0-9][A-Z0-9-]{2,19})\b")
        .unwrap()
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?P<url>https?://[^\s<>"')]+)"#).unwrap());

const MONTHS: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";

static DATE_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?P<date>\d{{1,2}}\s+(?:{MONTHS})\b(?:,?\s*\d{{4}})?|(?:{MONTHS})\s+\d{{1,2}}(?:,\s*\d{{4}})?)"
    ))
    .unwrap()
});

fn capture(re: &Regex, group: &str, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[group].to_string())
}

fn named_code(text: &str) -> Option<String> {
    capture(&NAMED_CODE_RE, "code", text)
}

fn pin_code(text: &str) -> Option<String> {
    capture(&PIN_RE, "code", text)
}

fn hash_code(text: &str) -> Option<String> {
    capture(&HASH_CODE_RE, "code", text)
}

fn digit_run(text: &str) -> Option<String> {
    capture(&DIGIT_RUN_RE, "code", text)
}

fn ups_tracking(text: &str) -> Option<String> {
    capture(&UPS_TRACKING_RE, "tracking", text)
}

fn named_tracking(text: &str) -> Option<String> {
    capture(&NAMED_TRACKING_RE, "tracking", text)
}

fn digit_tracking(text: &str) -> Option<String> {
    capture(&DIGIT_TRACKING_RE, "tracking", text)
}

/// Rules for access codes, most specific first. A text matching both a named
/// pattern ("gate code: 4821") and a bare one ("#1234") yields the named
/// pattern's capture.
const ACCESS_CODE_RULES: &[Rule] = &[named_code, pin_code, hash_code, digit_run];

const TRACKING_RULES: &[Rule] = &[ups_tracking, named_tracking, digit_tracking];

/// 4–8 digit access code from free text.
pub fn access_code(text: &str) -> Option<String> {
    first_match(ACCESS_CODE_RULES, text)
}

/// 6-character uppercase confirmation code ("Confirmation code: XJK4P2").
pub fn confirmation_code(text: &str) -> Option<String> {
    capture(&CONFIRMATION_RE, "code", text)
}

/// First dollar amount, returned with its `$` ("$1,299.99").
pub fn price(text: &str) -> Option<String> {
    PRICE_RE.find(text).map(|m| m.as_str().to_string())
}

/// Every dollar amount, in scan order.
pub fn all_prices(text: &str) -> Vec<String> {
    PRICE_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn phone_number(text: &str) -> Option<String> {
    capture(&PHONE_RE, "phone", text)
}

/// Bedroom count / price pair from a listing blurb ("3 bd, $2,400").
pub fn listing_summary(text: &str) -> Option<String> {
    LISTING_RE
        .captures(text)
        .map(|c| format!("{} bd, ${}", &c["beds"], &c["price"]))
}

pub fn like_count(text: &str) -> Option<u64> {
    capture(&LIKES_RE, "count", text).and_then(|c| c.replace(',', "").parse().ok())
}

pub fn comment_count(text: &str) -> Option<u64> {
    capture(&COMMENTS_RE, "count", text).and_then(|c| c.replace(',', "").parse().ok())
}

/// Carrier tracking number; UPS format outranks named and bare digit runs.
pub fn tracking_number(text: &str) -> Option<String> {
    first_match(TRACKING_RULES, text)
}

/// Flight designator following the word "flight" ("Flight UA 1234").
pub fn flight_number(text: &str) -> Option<String> {
    capture(&FLIGHT_RE, "flight", text)
}

/// Invoice reference following the word "invoice" ("Invoice #INV-120").
pub fn invoice_number(text: &str) -> Option<String> {
    capture(&INVOICE_RE, "num", text)
}

/// First http(s) URL, with trailing sentence punctuation stripped.
pub fn first_url(text: &str) -> Option<String> {
    URL_RE
        .find(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', '!', '?']).to_string())
}

/// Literal date phrase ("October 31", "31 October", "Oct 25, 2025" minus
/// abbreviations) suitable for the date parser.
pub fn date_phrase(text: &str) -> Option<String> {
    capture(&DATE_PHRASE_RE, "date", text)
}

/// "$1,299.99" → 1299.99
pub fn parse_amount(s: &str) -> Option<f64> {
    s.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_code_is_extracted() {
        assert_eq!(
            access_code("Your gate code: 4821. See you soon!"),
            Some("4821".to_string())
        );
    }

    #[test]
    fn named_pattern_outranks_bare_hash() {
        // #1234 appears earlier in scan order but the named rule wins.
        assert_eq!(
            access_code("Ref #1234, gate code: 4821"),
            Some("4821".to_string())
        );
    }

    #[test]
    fn bare_hash_code_is_a_fallback() {
        assert_eq!(access_code("Your order #5678 shipped"), Some("5678".to_string()));
    }

    #[test]
    fn no_digit_run_means_miss() {
        assert_eq!(access_code("see you at the usual place"), None);
        assert_eq!(access_code("room 12 on floor 3"), None);
    }

    #[test]
    fn pin_is_recognized() {
        assert_eq!(access_code("Your PIN is 009912"), Some("009912".to_string()));
    }

    #[test]
    fn confirmation_code_is_six_uppercase_chars() {
        assert_eq!(
            confirmation_code("Confirmation code: XJK4P2"),
            Some("XJK4P2".to_string())
        );
        assert_eq!(confirmation_code("Confirmation: ABC123, thanks"), Some("ABC123".to_string()));
        assert_eq!(confirmation_code("confirmation pending"), None);
    }

    #[test]
    fn price_keeps_the_dollar_sign() {
        assert_eq!(price("Now only $1,299.99 (was $1,499)"), Some("$1,299.99".to_string()));
        assert_eq!(price("Total due: $45"), Some("$45".to_string()));
        assert_eq!(price("free shipping"), None);
    }

    #[test]
    fn phone_number_formats() {
        assert_eq!(
            phone_number("Call (555) 123-4567 to reschedule"),
            Some("(555) 123-4567".to_string())
        );
        assert_eq!(
            phone_number("support: 555-123-4567"),
            Some("555-123-4567".to_string())
        );
    }

    #[test]
    fn listing_pairs_bedrooms_with_price() {
        assert_eq!(
            listing_summary("New listing: 3 bedroom apartment near the park, $2,400/mo"),
            Some("3 bd, $2,400".to_string())
        );
    }

    #[test]
    fn engagement_counts_strip_commas() {
        let text = "Your post got 1,024 likes and 37 comments this week";
        assert_eq!(like_count(text), Some(1024));
        assert_eq!(comment_count(text), Some(37));
        assert_eq!(like_count("no reactions yet"), None);
    }

    #[test]
    fn ups_tracking_outranks_digit_runs() {
        let text = "Order 123456789012, tracking 1Z999AA10123456784";
        assert_eq!(tracking_number(text), Some("1Z999AA10123456784".to_string()));
    }

    #[test]
    fn named_tracking_number() {
        assert_eq!(
            tracking_number("Tracking number: 9400111899223100001234"),
            Some("9400111899223100001234".to_string())
        );
    }

    #[test]
    fn flight_designator() {
        assert_eq!(
            flight_number("Check in for Flight UA 1234 departing SFO"),
            Some("UA 1234".to_string())
        );
        assert_eq!(flight_number("your flight leaves soon"), None);
    }

    #[test]
    fn invoice_references() {
        assert_eq!(
            invoice_number("Invoice #INV-120 is due Friday"),
            Some("INV-120".to_string())
        );
        assert_eq!(
            invoice_number("invoice number: 2025-0042"),
            Some("2025-0042".to_string())
        );
        assert_eq!(invoice_number("your payment cleared"), None);
    }

    #[test]
    fn first_url_trims_trailing_punctuation() {
        assert_eq!(
            first_url("Shop now at https://example.com/p/widget."),
            Some("https://example.com/p/widget".to_string())
        );
    }

    #[test]
    fn date_phrases_both_orders() {
        assert_eq!(
            date_phrase("Sale ends October 31!"),
            Some("October 31".to_string())
        );
        assert_eq!(
            date_phrase("Offer valid until 31 October"),
            Some("31 October".to_string())
        );
        assert_eq!(
            date_phrase("RSVP by December 5, 2025 please"),
            Some("December 5, 2025".to_string())
        );
    }

    #[test]
    fn amounts_parse_without_separators() {
        assert_eq!(parse_amount("$1,299.99"), Some(1299.99));
        assert_eq!(parse_amount("$45"), Some(45.0));
        assert_eq!(parse_amount("n/a"), None);
    }
}
