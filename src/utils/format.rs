//! Formatting utilities for document values.

use std::time::Duration;

/// Render a duration the way Perses and Prometheus spell them (`15m`, `1h30m`, `45s`).
///
/// Sub-second precision is dropped; a zero duration renders as `0s`.
pub fn format_duration(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    if secs == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    for (unit, size) in [("d", 86_400), ("h", 3_600), ("m", 60), ("s", 1)] {
        let count = secs / size;
        if count > 0 {
            out.push_str(&count.to_string());
            out.push_str(unit);
            secs %= size;
        }
    }
    out
}
