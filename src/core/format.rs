// src/core/format.rs

/// Binary unit step.
const UNIT: u64 = 1024;
const PREFIXES: &[char] = &['K', 'M', 'G', 'T', 'P', 'E'];

/// Formats a byte count in a human readable way (e.g. `999`, `1.2K`, `234.0M`, `2.0G`).
///
/// Counts below 1024 are printed as-is; larger ones are divided by the largest
/// power of 1024 not exceeding them and printed with one decimal.
pub fn human_readable(bytes: u64) -> String {
    if bytes < UNIT {
        return bytes.to_string();
    }

    let mut exp = 0;
    let mut scale = UNIT;
    while exp + 1 < PREFIXES.len() && bytes / scale >= UNIT {
        scale *= UNIT;
        exp += 1;
    }

    let prefix = PREFIXES.get(exp).copied().unwrap_or('E');
    format!("{:.1}{}", bytes as f64 / scale as f64, prefix)
}

/// Fits a string into `width` characters: longer strings are truncated,
/// shorter ones are left-padded with spaces when `fill` is set.
pub fn fit(text: &str, width: usize, fill: bool) -> String {
    let len = text.chars().count();
    if len > width {
        text.chars().take(width).collect()
    } else if len < width && fill {
        format!("{:>width$}", text, width = width)
    } else {
        text.to_string()
    }
}
