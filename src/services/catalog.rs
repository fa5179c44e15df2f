//! Built-in OSINT services and lookup URL construction.

use log::warn;
use url::Url;

/// Placeholder replaced by the encoded indicator in a URL template.
pub const QUERY_PLACEHOLDER: &str = "[QUERY]";

/// An external lookup service reachable by URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDefinition {
    /// Display name, also used as the history `tool`.
    pub name: &'static str,
    /// Search URL with a [`QUERY_PLACEHOLDER`].
    pub url_template: &'static str,
}

/// Every known service, in menu order.
pub const SERVICES: &[ServiceDefinition] = &[
    ServiceDefinition {
        name: "VirusTotal",
        url_template: "https://www.virustotal.com/gui/search/[QUERY]",
    },
    ServiceDefinition {
        name: "AbuseIPDB",
        url_template: "https://www.abuseipdb.com/check/[QUERY]",
    },
    ServiceDefinition {
        name: "URLScan",
        url_template: "https://urlscan.io/search/#[QUERY]",
    },
    ServiceDefinition {
        name: "Shodan",
        url_template: "https://www.shodan.io/search?query=[QUERY]",
    },
    ServiceDefinition {
        name: "Censys",
        url_template: "https://search.censys.io/search?q=[QUERY]",
    },
    ServiceDefinition {
        name: "AlienVault OTX",
        url_template: "https://otx.alienvault.com/browse/pulses?q=[QUERY]",
    },
    ServiceDefinition {
        name: "ThreatCrowd",
        url_template: "https://threatcrowd.org/ip.php?ip=[QUERY]",
    },
    ServiceDefinition {
        name: "IBM X-Force Exchange",
        url_template: "https://exchange.xforce.ibmcloud.com/search/[QUERY]",
    },
    ServiceDefinition {
        name: "MalwareBazaar",
        url_template: "https://bazaar.abuse.ch/browse.php?search=[QUERY]",
    },
    ServiceDefinition {
        name: "GreyNoise",
        url_template: "https://viz.greynoise.io/query/?gnql=[QUERY]",
    },
];

/// Looks up a service by exact name.
pub fn find_service(name: &str) -> Option<&'static ServiceDefinition> {
    SERVICES.iter().find(|service| service.name == name)
}

/// Names of all known services, in menu order.
pub fn service_names() -> impl Iterator<Item = &'static str> {
    SERVICES.iter().map(|service| service.name)
}

impl ServiceDefinition {
    /// Builds the search URL for `query`.
    ///
    /// Returns `None` if the result is not a valid URL.
    pub fn lookup_url(&self, query: &str) -> Option<String> {
        let url = self
            .url_template
            .replacen(QUERY_PLACEHOLDER, &encode_uri_component(query), 1);

        match Url::parse(&url) {
            Ok(_) => Some(url),
            Err(e) => {
                warn!("Rejecting lookup URL for {}: {}", self.name, e);
                None
            }
        }
    }
}

/// Builds the search URL for `query` on the service called `service`.
///
/// Returns `None` for an unknown service.
///
/// # Example
///
/// ```
/// use ioc_lookup::services::lookup_url;
///
/// assert_eq!(
///     lookup_url("Shodan", "8.8.8.8").as_deref(),
///     Some("https://www.shodan.io/search?query=8.8.8.8")
/// );
/// assert!(lookup_url("NoSuchService", "8.8.8.8").is_none());
/// ```
pub fn lookup_url(service: &str, query: &str) -> Option<String> {
    find_service(service)?.lookup_url(query)
}

/// Percent-encodes every byte outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut encoded = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => {
                encoded.push('%');
                encoded.push(HEX[(byte >> 4) as usize] as char);
                encoded.push(HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }
    encoded
}
