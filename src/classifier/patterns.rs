//! Compiled patterns backing the classification rules.
//!
//! Every pattern is anchored at both ends, so an indicator embedded in a
//! longer string never matches.

use once_cell::sync::Lazy;
use regex::Regex;

/// Dotted-quad IPv4 address, each octet 0-255.
static IPV4_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("Failed to compile IPv4 regex")
});

/// IPv6 address in full, `::`-compressed, link-local with zone index, or
/// IPv4-mapped/embedded form.
static IPV6_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(",
        r"([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}|",
        r"([0-9a-fA-F]{1,4}:){1,7}:|",
        r"([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}|",
        r"([0-9a-fA-F]{1,4}:){1,5}(:[0-9a-fA-F]{1,4}){1,2}|",
        r"([0-9a-fA-F]{1,4}:){1,4}(:[0-9a-fA-F]{1,4}){1,3}|",
        r"([0-9a-fA-F]{1,4}:){1,3}(:[0-9a-fA-F]{1,4}){1,4}|",
        r"([0-9a-fA-F]{1,4}:){1,2}(:[0-9a-fA-F]{1,4}){1,5}|",
        r"[0-9a-fA-F]{1,4}:((:[0-9a-fA-F]{1,4}){1,6})|",
        r":((:[0-9a-fA-F]{1,4}){1,7}|:)|",
        r"fe80:(:[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]+|",
        r"::(ffff(:0{1,4})?:)?((25[0-5]|(2[0-4]|1?[0-9])?[0-9])\.){3}(25[0-5]|(2[0-4]|1?[0-9])?[0-9])|",
        r"([0-9a-fA-F]{1,4}:){1,4}:((25[0-5]|(2[0-4]|1?[0-9])?[0-9])\.){3}(25[0-5]|(2[0-4]|1?[0-9])?[0-9])",
        r")$",
    ))
    .expect("Failed to compile IPv6 regex")
});

/// MD5, SHA-1 or SHA-256 digest in hex.
static HASH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-fA-F0-9]{32}|[a-fA-F0-9]{40}|[a-fA-F0-9]{64})$")
        .expect("Failed to compile hash regex")
});

/// `http://` or `https://` followed by anything.
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://.+").expect("Failed to compile URL regex"));

/// Hostname whose last label is an alphabetic TLD, with an optional
/// trailing root dot.
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*",
        r"\.[a-zA-Z]{2,}\.?$",
    ))
    .expect("Failed to compile domain regex")
});

pub fn is_ipv4(text: &str) -> bool {
    IPV4_REGEX.is_match(text)
}

pub fn is_ipv6(text: &str) -> bool {
    IPV6_REGEX.is_match(text)
}

pub fn is_hash(text: &str) -> bool {
    HASH_REGEX.is_match(text)
}

pub fn is_url(text: &str) -> bool {
    URL_REGEX.is_match(text)
}

pub fn is_domain(text: &str) -> bool {
    DOMAIN_REGEX.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_octet_bounds() {
        assert!(is_ipv4("0.0.0.0"));
        assert!(is_ipv4("255.255.255.255"));
        assert!(is_ipv4("192.168.1.10"));
        assert!(!is_ipv4("256.1.1.1"));
        assert!(!is_ipv4("1.2.3"));
        assert!(!is_ipv4("1.2.3.4.5"));
        assert!(!is_ipv4(" 1.2.3.4"));
        assert!(!is_ipv4("ip 10.0.0.1 seen"));
    }

    #[test]
    fn test_ipv6_forms() {
        assert!(is_ipv6("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
        assert!(is_ipv6("2001:db8::1"));
        assert!(is_ipv6("::1"));
        assert!(is_ipv6("::"));
        assert!(is_ipv6("fe80::1%eth0"));
        assert!(is_ipv6("::ffff:192.0.2.128"));
        assert!(is_ipv6("64:ff9b::192.0.2.33"));
        assert!(!is_ipv6("2001:db8:::1"));
        assert!(!is_ipv6("12345::1"));
        assert!(!is_ipv6("gggg::1"));
    }

    #[test]
    fn test_hash_widths() {
        assert!(is_hash(&"a".repeat(32)));
        assert!(is_hash(&"B".repeat(40)));
        assert!(is_hash(&"0".repeat(64)));
        assert!(!is_hash(&"a".repeat(33)));
        assert!(!is_hash(&"a".repeat(48)));
        assert!(!is_hash(&"g".repeat(32)));
    }

    #[test]
    fn test_url_prefix() {
        assert!(is_url("http://x"));
        assert!(is_url("https://example.com/a?b=c"));
        assert!(!is_url("https://"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("see https://example.com"));
    }

    #[test]
    fn test_domain_labels() {
        assert!(is_domain("example.com"));
        assert!(is_domain("sub.example.co.uk"));
        assert!(is_domain("my-host1.example.org"));
        assert!(is_domain("example.com."));
        assert!(!is_domain("-bad.com"));
        assert!(!is_domain("bad-.com"));
        assert!(!is_domain("example.c"));
        assert!(!is_domain("example.c0m"));
        assert!(!is_domain("localhost"));
        assert!(!is_domain(&format!("{}.com", "a".repeat(64))));
        assert!(is_domain(&format!("{}.com", "a".repeat(63))));
    }
}
