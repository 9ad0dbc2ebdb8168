use chrono::{FixedOffset, Timelike, Utc};

/// The source publishes Beijing-time quotes, so the store timestamp and
/// the digest gate use a fixed +8 offset, never the host timezone.
fn beijing() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("+8h is a valid offset")
}

/// Current UTC+8 wall-clock time as `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp() -> String {
    Utc::now()
        .with_timezone(&beijing())
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Current UTC+8 hour of day (0–23).
pub fn hour_of_day() -> u32 {
    Utc::now().with_timezone(&beijing()).hour()
}
