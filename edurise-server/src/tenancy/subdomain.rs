//! Host header parsing for subdomain-based tenant resolution.

/// Extract the candidate tenant subdomain from a request host.
///
/// Returns None for hosts that cannot carry a tenant label:
/// - localhost and *.localhost
/// - bare IPv4/IPv6 addresses (bracketed IPv6 included)
/// - hosts with two or fewer labels (edurise.com has no subdomain)
/// - labels on the reserved list (www, api, ...)
///
/// Any port suffix is stripped before inspection. The caller still has
/// to resolve the returned label against the tenant directory.
pub fn candidate_subdomain<'a>(host: &'a str, reserved: &[String]) -> Option<&'a str> {
    let host = host.trim();

    // Bracketed IPv6 literals like [::1]:8080
    if host.starts_with('[') {
        return None;
    }

    let host = host.split(':').next()?;
    if host.is_empty() {
        return None;
    }

    if host.eq_ignore_ascii_case("localhost")
        || host.to_ascii_lowercase().ends_with(".localhost")
    {
        return None;
    }

    if host.parse::<std::net::IpAddr>().is_ok() {
        return None;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return None;
    }

    let candidate = labels[0];
    if candidate.is_empty() {
        return None;
    }

    if reserved.iter().any(|r| candidate.eq_ignore_ascii_case(r)) {
        return None;
    }

    Some(candidate)
}
