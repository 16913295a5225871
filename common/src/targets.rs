//! # Address Lists
//!
//! Addresses reach the tool as `host:port` strings, either one per flag or as a
//! comma-separated list (e.g. `10.0.0.1:22, 10.0.0.2:443`).
//!
//! Entries are trimmed and blank ones dropped. Nothing else is checked: a malformed
//! address is still probed and reported as a failure by the dialer.

/// Splits every raw value on commas and flattens the result, keeping the original order.
pub fn split_addresses<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|value| {
            value
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(String::from)
                .collect::<Vec<String>>()
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
