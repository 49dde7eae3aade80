use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;

pub const DEFAULT_REFRESH_INTERVAL: TimeDelta = TimeDelta::seconds(1800);

/// Whether the cached weather is stale. A clock that moved backwards counts
/// as stale so a time correction cannot freeze the weather.
pub fn should_refresh(
    now: DateTime<Tz>,
    last_fetched_at: Option<DateTime<Tz>>,
    interval: TimeDelta,
) -> bool {
    let Some(last_fetched_at) = last_fetched_at else {
        return true;
    };

    let elapsed = now - last_fetched_at;
    elapsed < TimeDelta::zero() || elapsed >= interval
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use chrono_tz::America::Edmonton;

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Tz> {
        Edmonton
            .with_ymd_and_hms(2025, 3, 5, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn first_call_always_refreshes() {
        assert!(should_refresh(at(14, 0, 0), None, DEFAULT_REFRESH_INTERVAL));
    }

    #[test]
    fn fresh_sample_is_kept() {
        let fetched = at(14, 0, 0);
        assert!(!should_refresh(fetched, Some(fetched), DEFAULT_REFRESH_INTERVAL));
        assert!(!should_refresh(
            at(14, 29, 59),
            Some(fetched),
            DEFAULT_REFRESH_INTERVAL
        ));
    }

    #[test]
    fn stale_after_interval() {
        let fetched = at(14, 0, 0);
        assert!(should_refresh(at(14, 30, 0), Some(fetched), DEFAULT_REFRESH_INTERVAL));
        assert!(should_refresh(at(18, 0, 0), Some(fetched), DEFAULT_REFRESH_INTERVAL));
    }

    #[test]
    fn clock_going_backwards_refreshes() {
        assert!(should_refresh(
            at(13, 59, 50),
            Some(at(14, 0, 0)),
            DEFAULT_REFRESH_INTERVAL
        ));
    }
}
