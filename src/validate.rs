use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):(.*)$").expect("static regex"));

/// Schemes whose URLs must name a host.
const HOST_SCHEMES: &[&str] = &["http", "https", "ws", "wss", "ftp"];

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Absolute URL check.
///
/// Any `scheme:rest` is accepted. Web schemes additionally need a non-empty host without
/// whitespace and, if given, a numeric port no larger than 65535.
pub fn is_valid_url(url: &str) -> bool {
    let Some(caps) = SCHEME.captures(url.trim()) else {
        return false;
    };
    let scheme = caps[1].to_ascii_lowercase();
    if !HOST_SCHEMES.contains(&scheme.as_str()) {
        return true;
    }

    let rest = caps[2].trim_start_matches(['/', '\\']);
    let authority = rest.split(['/', '\\', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let (host, port) = split_port(host_port);

    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return false;
    }
    match port {
        None | Some("") => true,
        Some(p) => p.parse::<u16>().is_ok(),
    }
}

fn split_port(host_port: &str) -> (&str, Option<&str>) {
    // Bracketed IPv6 literals contain colons of their own.
    if let Some(end) = host_port.strip_prefix('[').and_then(|s| s.find(']')) {
        let (host, tail) = host_port.split_at(end + 2);
        return (host, tail.strip_prefix(':'));
    }
    match host_port.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    }
}
