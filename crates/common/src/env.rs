//! Environment variable readers shared by the configuration layers.

/// Reads an unsigned integer from `name`. Unset or unparsable values yield `None`.
pub fn parse_env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok()?.trim().parse::<usize>().ok()
}

/// Reads a boolean flag from `name`, accepting the usual spellings.
pub fn parse_env_bool(name: &str) -> Option<bool> {
    let v = std::env::var(name).ok()?;
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reads a non-empty string from `name`.
pub fn parse_env_string(name: &str) -> Option<String> {
    let v = std::env::var(name).ok()?;
    let trimmed = v.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Clamps `v` into `[min, max]`.
pub fn clamp(v: usize, min: usize, max: usize) -> usize {
    if v < min {
        return min;
    }
    if v > max {
        return max;
    }
    v
}
