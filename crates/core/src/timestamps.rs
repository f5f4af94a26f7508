#![forbid(unsafe_code)]

//! Millisecond UTC timestamps, the resolution the store persists.

use time::OffsetDateTime;

pub fn now_ms() -> i64 {
    to_unix_ms(OffsetDateTime::now_utc())
}

pub fn to_unix_ms(value: OffsetDateTime) -> i64 {
    let ms = value.unix_timestamp_nanos() / 1_000_000i128;
    if ms <= 0 {
        0
    } else if ms >= i64::MAX as i128 {
        i64::MAX
    } else {
        ms as i64
    }
}

/// Out-of-range values collapse to the unix epoch.
pub fn from_unix_ms(ms: i64) -> OffsetDateTime {
    let nanos = (ms as i128) * 1_000_000i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Next `updated_at` value: the wall clock, but never at or before `previous_ms`.
pub fn advance_ms(previous_ms: i64, now_ms: i64) -> i64 {
    now_ms.max(previous_ms.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ms_round_trip_keeps_millisecond_precision() {
        let ms = 1_767_225_600_123;
        assert_eq!(to_unix_ms(from_unix_ms(ms)), ms);
    }

    #[test]
    fn advance_is_strictly_monotonic() {
        assert_eq!(advance_ms(100, 250), 250);
        assert_eq!(advance_ms(100, 100), 101);
        assert_eq!(advance_ms(100, 40), 101);
    }

    #[test]
    fn negative_instants_clamp_to_epoch() {
        assert_eq!(to_unix_ms(from_unix_ms(-5)), 0);
    }
}
