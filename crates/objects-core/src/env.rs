//! Small environment-variable helpers shared by the three binaries'
//! config loading, following the env-driven configuration style of the
//! original `object_server.py` / `locator_api.py`.

use std::str::FromStr;

/// Read an env var and parse it, falling back to `default` if unset.
/// A set-but-unparseable value is treated as unset rather than a hard
/// error, matching the teacher's tolerant CLI-config style.
pub fn var_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read a comma-separated list env var, dropping empty entries.
pub fn var_list(name: &str) -> Vec<String> {
    std::env::var(name)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
