use chrono::{NaiveDateTime, Timelike, Utc};

/// Format a creation instant as the ISO-8601 string written into
/// `created_datetime` metadata.
///
/// Sub-second digits are included only when nonzero, as microseconds:
/// `2023-01-01T00:00:00` or `2023-01-01T00:00:00.123456`.
pub fn format_instant(instant: &NaiveDateTime) -> String {
    let mut iso = instant.format("%Y-%m-%dT%H:%M:%S").to_string();
    let micros = instant.nanosecond() / 1_000;
    if micros > 0 {
        iso.push_str(&format!(".{micros:06}"));
    }
    iso
}

/// Source of creation instants.
///
/// Records are stamped with a creation instant that doubles as their filename
/// key, so the clock is a seam: production code uses [`SystemClock`], tests
/// use [`FixedClock`] to pin filenames and metadata.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in UTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// A clock frozen at a fixed instant, for tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn whole_second_instant_has_no_fraction() {
        assert_eq!(format_instant(&instant(0, 0, 0)), "2023-01-01T00:00:00");
    }

    #[test]
    fn subsecond_instant_carries_microseconds() {
        let dt = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_micro_opt(12, 30, 45, 123_456)
            .unwrap();
        assert_eq!(format_instant(&dt), "2023-01-01T12:30:45.123456");
    }

    #[test]
    fn fixed_clock_returns_its_instant() {
        let clock = FixedClock(instant(9, 15, 0));
        assert_eq!(clock.now(), instant(9, 15, 0));
        assert_eq!(clock.now(), clock.now());
    }
}
