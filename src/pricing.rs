// Stay pricing: pure functions recomputed on every read, never cached
use chrono::NaiveDate;

use crate::model::RoomType;

// A day is exactly 86,400,000 ms for night counting. Calendar-aware date math
// would disagree across DST transitions; the booking flow must not.
pub const MS_PER_NIGHT: i64 = 86_400_000;

// Derived cost of a stay. Only ever produced for strictly positive night
// counts; an unordered or incomplete date range yields no summary at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingSummary {
    pub nights: i64,
    pub total: f64,
}

// Night count via ceiling division on the millisecond span between the two
// dates. Returns None for zero or negative spans.
pub fn night_count(check_in: NaiveDate, check_out: NaiveDate) -> Option<i64> {
    let span_ms = check_out
        .signed_duration_since(check_in)
        .num_milliseconds();
    if span_ms <= 0 {
        return None;
    }
    Some((span_ms + MS_PER_NIGHT - 1) / MS_PER_NIGHT)
}

// Price a stay for `rooms` units of the given room type. Incomplete input is
// an "incomplete" state, not an error, so the caller can keep rendering the
// form without a summary box.
pub fn quote(
    room: &RoomType,
    check_in: NaiveDate,
    check_out: NaiveDate,
    rooms: u32,
) -> Option<PricingSummary> {
    let nights = night_count(check_in, check_out)?;
    let total = room.rate * nights as f64 * rooms as f64;
    tracing::debug!(
        room = %room.id,
        nights,
        total,
        "recomputed pricing summary"
    );
    Some(PricingSummary { nights, total })
}
