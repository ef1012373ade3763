//! Input predicates for destinations, codes and passwords.
//!
//! All functions are pure. [`sanitize_destination`] must run before any other
//! check, before the safety oracle and before persistence.

use std::net::{Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

/// Maximum accepted destination length, in bytes.
pub const URL_MAX_LENGTH: usize = 2000;

/// Length of every short code.
pub const CODE_LENGTH: usize = 6;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 256;

/// Schemes rejected wherever they appear in the raw destination string.
pub const DEFAULT_BLOCKED_SCHEMES: &[&str] = &[
    "javascript:",
    "data:",
    "vbscript:",
    "file:",
    "about:",
    "blob:",
];

/// Destination acceptance rules.
#[derive(Debug, Clone)]
pub struct DestinationPolicy {
    max_length: usize,
    blocked_schemes: Vec<String>,
}

impl Default for DestinationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_SCHEMES.iter().map(|s| s.to_string()))
    }
}

impl DestinationPolicy {
    /// Builds a policy with a custom scheme block-list.
    ///
    /// Entries are lowercased and given a trailing `:` if they lack one.
    pub fn new(blocked_schemes: impl IntoIterator<Item = String>) -> Self {
        let blocked_schemes = blocked_schemes
            .into_iter()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .map(|s| if s.ends_with(':') { s } else { format!("{s}:") })
            .collect();

        Self {
            max_length: URL_MAX_LENGTH,
            blocked_schemes,
        }
    }

    pub fn blocked_schemes(&self) -> &[String] {
        &self.blocked_schemes
    }

    /// Checks a sanitized destination.
    ///
    /// # Rules
    ///
    /// - Non-empty and at most 2000 bytes
    /// - No blocked scheme anywhere in the raw string (case-insensitive)
    /// - Parses as an absolute `http` or `https` URL with a host
    /// - No userinfo (`@` in the authority) and no `..` in the host
    /// - Host is not loopback, private, link-local or otherwise local
    pub fn is_valid(&self, url: &str) -> bool {
        if url.is_empty() || url.len() > self.max_length {
            return false;
        }

        let lowered = url.to_ascii_lowercase();
        if self
            .blocked_schemes
            .iter()
            .any(|scheme| lowered.contains(scheme.as_str()))
        {
            return false;
        }

        if raw_authority(url).is_some_and(|authority| authority.contains('@')) {
            return false;
        }

        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }

        if !parsed.username().is_empty() || parsed.password().is_some() {
            return false;
        }

        match parsed.host() {
            None => false,
            Some(Host::Domain(domain)) => {
                !domain.is_empty()
                    && !domain.contains("..")
                    && !domain.contains('@')
                    && !is_local_hostname(domain)
            }
            Some(Host::Ipv4(ip)) => !is_private_ipv4(ip),
            Some(Host::Ipv6(ip)) => !is_private_ipv6(ip),
        }
    }
}

/// Checks a destination against the default policy.
pub fn is_valid_destination(url: &str) -> bool {
    DestinationPolicy::default().is_valid(url)
}

/// Returns true if `code` is exactly six ASCII letters or digits.
///
/// # Examples
///
/// ```
/// use linkgate::utils::validation::is_valid_code;
///
/// assert!(is_valid_code("Ab12Cd"));
/// assert!(!is_valid_code("ab12_3"));
/// ```
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns true if the password has between 8 and 256 characters.
pub fn is_valid_password(password: &str) -> bool {
    let length = password.chars().count();
    (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length)
}

/// Removes control characters (`\r`, `\n`, `\t` and the rest of the C0/C1
/// ranges) and surrounding whitespace.
pub fn sanitize_destination(url: &str) -> String {
    url.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Authority component of the raw string, before any URL parsing.
fn raw_authority(url: &str) -> Option<&str> {
    let rest = &url[url.find("://")? + 3..];
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

fn is_local_hostname(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    domain == "localhost"
        || domain.ends_with(".localhost")
        || domain.ends_with(".local")
        || domain.ends_with(".internal")
}

fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        // 100.64.0.0/10 carrier-grade NAT
        || (ip.octets()[0] == 100 && (ip.octets()[1] & 0b1100_0000) == 64)
}

fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_private_ipv4(v4);
    }

    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
}
