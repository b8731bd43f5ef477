// ABOUTME: URL validation - the SSRF defense. Checks the parsed hostname
// ABOUTME: against loopback/private/link-local ranges and metadata endpoints.

use std::net::{Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

use crate::error::SecurityError;

/// Hostnames that are never fetchable.
const BLOCKED_HOSTS: &[&str] = &["localhost", "metadata.google.internal"];

/// Path prefixes that identify cloud metadata endpoints.
const METADATA_PATHS: &[&str] = &["/latest/meta-data", "/computemetadata"];

/// Validate an outbound URL before any request is made.
///
/// Checks run on the parsed hostname, never on the raw string. Hostnames
/// are not resolved through DNS, so a public name pointing at a private
/// address is not caught here; callers needing that guarantee must
/// re-check the connected peer address.
///
/// Returns the parsed URL on success.
pub fn validate_url(raw: &str) -> Result<Url, SecurityError> {
    let parsed = Url::parse(raw).map_err(|e| SecurityError::Url(format!("invalid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(SecurityError::Url(format!(
                "scheme '{other}' is not allowed, only http and https"
            )));
        }
    }

    let host = parsed
        .host()
        .ok_or_else(|| SecurityError::Url("URL has no host".to_string()))?;

    match host {
        Host::Domain(domain) => {
            let lower = domain.to_lowercase();
            if BLOCKED_HOSTS.contains(&lower.as_str()) || lower.ends_with(".localhost") {
                return Err(SecurityError::Url(format!(
                    "host '{lower}' is not reachable"
                )));
            }
        }
        Host::Ipv4(ip) => {
            if let Some(range) = blocked_v4_range(ip) {
                return Err(SecurityError::Url(format!(
                    "address {ip} is in a blocked range ({range})"
                )));
            }
        }
        Host::Ipv6(ip) => {
            if let Some(range) = blocked_v6_range(ip) {
                return Err(SecurityError::Url(format!(
                    "address {ip} is in a blocked range ({range})"
                )));
            }
        }
    }

    let path = parsed.path().to_lowercase();
    if METADATA_PATHS.iter().any(|prefix| path.starts_with(prefix)) {
        return Err(SecurityError::Url(
            "request targets a cloud metadata endpoint".to_string(),
        ));
    }

    Ok(parsed)
}

fn blocked_v4_range(ip: Ipv4Addr) -> Option<&'static str> {
    if ip.is_loopback() {
        Some("loopback")
    } else if ip.is_private() {
        Some("private")
    } else if ip.is_link_local() {
        Some("link-local")
    } else if ip.is_unspecified() {
        Some("unspecified")
    } else {
        None
    }
}

fn blocked_v6_range(ip: Ipv6Addr) -> Option<&'static str> {
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return blocked_v4_range(mapped);
    }
    if ip.is_loopback() {
        Some("loopback")
    } else if ip.is_unspecified() {
        Some("unspecified")
    } else if (ip.segments()[0] & 0xfe00) == 0xfc00 {
        Some("unique-local")
    } else if (ip.segments()[0] & 0xffc0) == 0xfe80 {
        Some("link-local")
    } else {
        None
    }
}
