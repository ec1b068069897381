//! Human-readable size, age and date rendering for listings.

use chrono::{LocalResult, TimeZone, Utc};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Byte counts below 8 KiB print exactly; above, tenth-precision units with
/// floored tenths and a dropped trailing `.0`.
pub fn size(bytes: u64) -> String {
    if bytes < 8192 {
        format!("{bytes} bytes")
    } else if bytes < MIB {
        format!("{} KB", tenths(bytes, KIB))
    } else if bytes < GIB {
        format!("{} MB", tenths(bytes, MIB))
    } else {
        format!("{} GB", tenths(bytes, GIB))
    }
}

fn tenths(bytes: u64, unit: u64) -> String {
    let t = (bytes as u128 * 10 / unit as u128) as u64;
    if t % 10 == 0 {
        format!("{}", t / 10)
    } else {
        format!("{}.{}", t / 10, t % 10)
    }
}

/// Elapsed milliseconds as `3d4h5m6s`. Negative input clamps to zero.
pub fn age(elapsed_ms: i64) -> String {
    let mut s = (elapsed_ms / 1000).max(0);
    let d = s / 86_400;
    s -= d * 86_400;
    let h = s / 3600;
    s -= h * 3600;
    let m = s / 60;
    s -= m * 60;
    format!("{d}d{h}h{m}m{s}s")
}

/// Epoch milliseconds as an RFC 3339 UTC timestamp. Out-of-range input gets
/// a placeholder instead of a panic.
pub fn date(epoch_ms: i64) -> String {
    match Utc.timestamp_millis_opt(epoch_ms) {
        LocalResult::Single(t) => t.to_rfc3339(),
        _ => format!("invalid timestamp {epoch_ms}"),
    }
}
