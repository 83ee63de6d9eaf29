//! Pure parsing of the loosely formatted text the interface exposes. No side
//! effects; unparsable input reads as zero or as absent, never as an error.

use std::sync::LazyLock;

use regex::Regex;

static PER_SECOND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\+(\d+)\s*stimulation per second").unwrap());

static COST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Cost:\s*([0-9,.]+)").unwrap());

/// Parses a currency-like quantity such as `Cost: 1,234.5` by stripping
/// everything that is not a digit or decimal point. A true zero and garbage
/// are indistinguishable; callers that need the distinction use [`parse_cost`].
pub fn extract_number(text: &str) -> f64 {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().unwrap_or(0.0)
}

/// Recurring yield advertised by an upgrade description, e.g.
/// `+3 stimulation per second`. Zero when no such annotation is present.
pub fn extract_priority_score(text: &str) -> f64 {
    PER_SECOND_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Cost fields carry a `Cost: <amount>` prefix. A missing prefix means the
/// field is unreadable, which is not the same as a zero cost.
pub fn parse_cost(text: &str) -> Option<f64> {
    let caps = COST_RE.captures(text)?;
    Some(extract_number(caps.get(1)?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_free_text_reads_as_zero() {
        assert_eq!(extract_number(""), 0.0);
        assert_eq!(extract_number("no digits here"), 0.0);
        assert_eq!(extract_number("..."), 0.0);
    }

    #[test]
    fn comma_grouped_costs_parse() {
        assert_eq!(extract_number("Cost: 1,234.5"), 1234.5);
        assert_eq!(extract_number("9,000"), 9000.0);
    }

    #[test]
    fn plain_totals_parse() {
        assert_eq!(extract_number("120 stimulation"), 120.0);
        assert_eq!(extract_number("0"), 0.0);
    }

    #[test]
    fn stray_decimal_points_read_as_zero() {
        assert_eq!(extract_number("1.2.3"), 0.0);
    }

    #[test]
    fn per_second_pattern_is_case_insensitive() {
        assert_eq!(extract_priority_score("+7 stimulation per second"), 7.0);
        assert_eq!(extract_priority_score("+7 Stimulation Per Second"), 7.0);
        assert_eq!(
            extract_priority_score("gains +12 stimulation per second, forever"),
            12.0
        );
    }

    #[test]
    fn missing_per_second_pattern_scores_zero() {
        assert_eq!(extract_priority_score("makes everything shinier"), 0.0);
        assert_eq!(extract_priority_score("+5 dopamine per second"), 0.0);
        assert_eq!(extract_priority_score(""), 0.0);
    }

    #[test]
    fn cost_prefix_is_required() {
        assert_eq!(parse_cost("Cost: 250"), Some(250.0));
        assert_eq!(parse_cost("cost: 1,000"), Some(1000.0));
        assert_eq!(parse_cost("Cost: 0"), Some(0.0));
        assert_eq!(parse_cost("250"), None);
        assert_eq!(parse_cost("priceless"), None);
    }
}
