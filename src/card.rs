// 🔢 Card number helpers - network detection and display formatting
// Pure functions over the digit string; no state, no I/O.

use crate::model::CardType;

/// Strip everything that is not an ASCII digit.
pub fn clean_number(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Detect the card network from the number prefix. First match wins:
///
/// 1. "4"         → Visa
/// 2. "5" or "2"  → Mastercard
/// 3. "34" / "37" → Amex
/// 4. "6"         → Discover
/// 5. otherwise   → Visa (default)
///
/// "34"/"37" start with '3', so the earlier Mastercard '2' rule cannot
/// shadow them. The prefix tests ignore any spaces in the input.
pub fn detect_card_type(number: &str) -> CardType {
    let clean: String = number.chars().filter(|c| !c.is_whitespace()).collect();

    if clean.starts_with('4') {
        CardType::Visa
    } else if clean.starts_with('5') || clean.starts_with('2') {
        CardType::Mastercard
    } else if clean.starts_with("34") || clean.starts_with("37") {
        CardType::Amex
    } else if clean.starts_with('6') {
        CardType::Discover
    } else {
        CardType::Visa
    }
}

/// Format a card number for display.
///
/// Strips non-digits first, then:
/// - Amex: 4-6-5 grouping ("3714 496353 98431"), capped at 17 chars.
///   Grouping only kicks in once all 15 digits are present; anything
///   typed past 15 digits is dropped.
/// - Everything else: groups of 4, capped at 19 chars (16 digits).
///
/// Always call this against the latest full digit string, never against a
/// previously formatted value, so grouping artifacts do not compound.
pub fn format_card_number(input: &str) -> String {
    let digits = clean_number(input);
    let card_type = detect_card_type(&digits);

    if card_type == CardType::Amex {
        if digits.len() >= 15 {
            format!("{} {} {}", &digits[..4], &digits[4..10], &digits[10..15])
        } else {
            digits
        }
    } else {
        let mut out = String::new();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && i % 4 == 0 {
                out.push(' ');
            }
            out.push(ch);
        }
        out.truncate(19);
        out
    }
}

/// Last 4 digits of an already-cleaned number, for display.
pub fn last_four(clean: &str) -> String {
    if clean.len() <= 4 {
        clean.to_string()
    } else {
        clean[clean.len() - 4..].to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
