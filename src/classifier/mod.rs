//! Indicator-of-compromise classification.
//!
//! Maps an arbitrary string to exactly one [`IndicatorType`] by evaluating an
//! ordered list of rules. The first rule that matches decides the category;
//! later rules are never consulted. Classification is total and has no error
//! path: anything no rule accepts is [`IndicatorType::Unknown`].
//!
//! # Example
//!
//! ```
//! use ioc_lookup::classifier::{classify, IndicatorType};
//!
//! assert_eq!(classify("8.8.8.8"), IndicatorType::Ip);
//! assert_eq!(classify("example.com"), IndicatorType::Domain);
//! assert_eq!(classify("not a valid value"), IndicatorType::Unknown);
//! ```

pub mod patterns;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category assigned to a selected piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorType {
    /// IPv4 or IPv6 address.
    Ip,
    /// MD5, SHA-1 or SHA-256 digest.
    Hash,
    /// Fully qualified domain name.
    Domain,
    /// `http(s)://` URL.
    Url,
    /// Anything else.
    Unknown,
}

impl IndicatorType {
    /// All categories, in the order filter controls list them.
    pub const ALL: [IndicatorType; 5] = [
        IndicatorType::Ip,
        IndicatorType::Hash,
        IndicatorType::Domain,
        IndicatorType::Url,
        IndicatorType::Unknown,
    ];

    /// Returns the lowercase tag used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorType::Ip => "ip",
            IndicatorType::Hash => "hash",
            IndicatorType::Domain => "domain",
            IndicatorType::Url => "url",
            IndicatorType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ip" => Ok(IndicatorType::Ip),
            "hash" => Ok(IndicatorType::Hash),
            "domain" => Ok(IndicatorType::Domain),
            "url" => Ok(IndicatorType::Url),
            "unknown" => Ok(IndicatorType::Unknown),
            other => Err(format!("Unknown indicator type: {}", other)),
        }
    }
}

/// A single (predicate, category) pair in the classification order.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    /// Short name used in logs and tests.
    pub name: &'static str,
    /// Returns `true` when the whole input belongs to `category`.
    pub matches: fn(&str) -> bool,
    /// Category assigned on a match.
    pub category: IndicatorType,
}

impl fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

/// Classification rules in priority order.
///
/// Order matters for ambiguous input: a 32-character hex string is a hash
/// because the hash rule runs before the domain rule.
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "ipv4",
        matches: patterns::is_ipv4,
        category: IndicatorType::Ip,
    },
    ClassificationRule {
        name: "ipv6",
        matches: patterns::is_ipv6,
        category: IndicatorType::Ip,
    },
    ClassificationRule {
        name: "hash",
        matches: patterns::is_hash,
        category: IndicatorType::Hash,
    },
    ClassificationRule {
        name: "url",
        matches: patterns::is_url,
        category: IndicatorType::Url,
    },
    ClassificationRule {
        name: "domain",
        matches: patterns::is_domain,
        category: IndicatorType::Domain,
    },
];

/// Classifies `text` against [`RULES`].
///
/// The input is matched exactly as given; callers trim surrounding
/// whitespace first.
pub fn classify(text: &str) -> IndicatorType {
    classify_with(RULES, text)
}

/// Classifies `text` against an arbitrary ordered rule list.
///
/// Returns the category of the first matching rule, or
/// [`IndicatorType::Unknown`] when none match.
pub fn classify_with(rules: &[ClassificationRule], text: &str) -> IndicatorType {
    rules
        .iter()
        .find(|rule| (rule.matches)(text))
        .map(|rule| rule.category)
        .unwrap_or(IndicatorType::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("192.168.0.1"), IndicatorType::Ip);
        assert_eq!(classify("2001:db8::ff00:42:8329"), IndicatorType::Ip);
        assert_eq!(
            classify("d41d8cd98f00b204e9800998ecf8427e"),
            IndicatorType::Hash
        );
        assert_eq!(
            classify("da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            IndicatorType::Hash
        );
        assert_eq!(
            classify("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
            IndicatorType::Hash
        );
        assert_eq!(classify("https://example.com/path"), IndicatorType::Url);
        assert_eq!(classify("example.com"), IndicatorType::Domain);
        assert_eq!(classify("not a valid value"), IndicatorType::Unknown);
    }

    #[test]
    fn test_out_of_range_octet_is_unknown() {
        assert_eq!(classify("256.1.1.1"), IndicatorType::Unknown);
    }

    #[test]
    fn test_input_is_not_trimmed() {
        assert_eq!(classify(" 8.8.8.8"), IndicatorType::Unknown);
        assert_eq!(classify("example.com\n"), IndicatorType::Unknown);
        assert_eq!(classify(""), IndicatorType::Unknown);
    }

    #[test]
    fn test_url_wins_over_domain() {
        assert_eq!(classify("http://example.com"), IndicatorType::Url);
    }

    #[test]
    fn test_rule_order_decides_ambiguous_input() {
        let all_hex = "deadbeef".repeat(4);

        let domain_first = [
            ClassificationRule {
                name: "anything",
                matches: |_| true,
                category: IndicatorType::Domain,
            },
            RULES[2],
        ];
        assert_eq!(classify_with(&domain_first, &all_hex), IndicatorType::Domain);
        assert_eq!(classify_with(RULES, &all_hex), IndicatorType::Hash);
        assert_eq!(classify_with(&[], &all_hex), IndicatorType::Unknown);
    }

    #[test]
    fn test_rule_names_in_priority_order() {
        let names: Vec<&str> = RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(names, vec!["ipv4", "ipv6", "hash", "url", "domain"]);
    }

    #[test]
    fn test_indicator_type_round_trip_text() {
        for kind in IndicatorType::ALL {
            assert_eq!(kind.as_str().parse::<IndicatorType>().unwrap(), kind);
        }
        assert!("email".parse::<IndicatorType>().is_err());
        assert_eq!(
            serde_json::to_string(&IndicatorType::Domain).unwrap(),
            "\"domain\""
        );
    }

    proptest! {
        #[test]
        fn prop_every_dotted_quad_is_ip(a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255) {
            let text = format!("{}.{}.{}.{}", a, b, c, d);
            prop_assert_eq!(classify(&text), IndicatorType::Ip);
        }

        #[test]
        fn prop_octet_above_255_is_not_ip(a in 256u32..1000, b in 0u8..=255) {
            let text = format!("{}.{}.1.1", a, b);
            prop_assert_ne!(classify(&text), IndicatorType::Ip);
        }

        #[test]
        fn prop_classify_never_panics(text in ".*") {
            let _ = classify(&text);
        }
    }
}
