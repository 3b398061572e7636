//! Lenient environment parsing: unset, blank, or unparsable values yield the default.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Trimmed, non-empty value of `name`.
pub fn string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn optional_path(name: &str) -> Option<PathBuf> {
    string(name).map(PathBuf::from)
}

pub fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    string(name).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (any case).
pub fn bool_or(name: &str, default: bool) -> bool {
    match string(name).map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

pub fn millis_or(name: &str, default: Duration) -> Duration {
    string(name)
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

pub fn secs_or(name: &str, default: Duration) -> Duration {
    string(name)
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// Comma-separated list of exactly `N` floats.
pub fn f64_array_or<const N: usize>(name: &str, default: [f64; N]) -> [f64; N] {
    let Some(raw) = string(name) else {
        return default;
    };

    let parsed: Option<Vec<f64>> = raw.split(',').map(|p| p.trim().parse().ok()).collect();
    parsed
        .and_then(|values| <[f64; N]>::try_from(values).ok())
        .unwrap_or(default)
}
