//! Time and timestamp helpers.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the current wall-clock time at a fixed offset from UTC.
///
/// Offsets outside ±24h fall back to UTC.
#[must_use]
pub fn local_now(offset_minutes: i32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(offset_minutes.saturating_mul(60))
        .unwrap_or_else(|| Utc.fix());
    now().with_timezone(&offset)
}
