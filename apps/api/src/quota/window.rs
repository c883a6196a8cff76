use chrono::{DateTime, Days, Utc};

/// Word usage within one daily accounting period for a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaWindow {
    /// Words admitted so far in this window.
    pub used: u64,
    /// Exclusive end of the window: the first UTC midnight after the window opened.
    pub resets_at: DateTime<Utc>,
}

impl QuotaWindow {
    /// Opens an empty window at `now`.
    pub fn open(now: DateTime<Utc>) -> Self {
        Self {
            used: 0,
            resets_at: next_utc_midnight(now),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.resets_at
    }

    /// Replaces an expired window with a fresh one. Returns whether a rollover happened.
    pub fn roll_over_if_expired(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_expired(now) {
            return false;
        }
        *self = Self::open(now);
        true
    }

    /// Remaining budget under `limit`, floored at zero.
    pub fn remaining(&self, limit: u64) -> u64 {
        limit.saturating_sub(self.used)
    }
}

/// The first UTC midnight strictly after `now`.
///
/// An instant exactly at midnight maps to the following midnight, so a window opened at
/// 00:00:00 lasts a full day.
pub fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    // ── next_utc_midnight ───────────────────────────────────────────────────

    #[test]
    fn test_next_midnight_from_afternoon() {
        assert_eq!(
            next_utc_midnight(at("2025-06-15T14:00:00Z")),
            at("2025-06-16T00:00:00Z")
        );
    }

    #[test]
    fn test_next_midnight_from_exact_midnight_is_next_day() {
        assert_eq!(
            next_utc_midnight(at("2025-06-15T00:00:00Z")),
            at("2025-06-16T00:00:00Z")
        );
    }

    #[test]
    fn test_next_midnight_last_instant_of_day() {
        assert_eq!(
            next_utc_midnight(at("2025-06-15T23:59:59.999Z")),
            at("2025-06-16T00:00:00Z")
        );
    }

    #[test]
    fn test_next_midnight_crosses_month_and_year() {
        assert_eq!(
            next_utc_midnight(at("2024-12-31T18:30:00Z")),
            at("2025-01-01T00:00:00Z")
        );
        assert_eq!(
            next_utc_midnight(at("2024-02-28T12:00:00Z")),
            at("2024-02-29T00:00:00Z")
        );
    }

    #[test]
    fn test_next_midnight_ignores_source_offset() {
        // 23:00 at UTC-05:00 is already 04:00 the next day in UTC.
        let local = DateTime::parse_from_rfc3339("2025-06-15T23:00:00-05:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(next_utc_midnight(local), at("2025-06-17T00:00:00Z"));
    }

    // ── QuotaWindow ─────────────────────────────────────────────────────────

    #[test]
    fn test_window_expires_exactly_at_midnight() {
        let window = QuotaWindow::open(at("2025-06-15T14:00:00Z"));
        assert!(!window.is_expired(at("2025-06-15T23:59:59Z")));
        assert!(window.is_expired(at("2025-06-16T00:00:00Z")));
    }

    #[test]
    fn test_roll_over_replaces_expired_window() {
        let mut window = QuotaWindow::open(at("2025-06-15T14:00:00Z"));
        window.used = 500;

        assert!(!window.roll_over_if_expired(at("2025-06-15T20:00:00Z")));
        assert_eq!(window.used, 500);

        assert!(window.roll_over_if_expired(at("2025-06-17T09:00:00Z")));
        assert_eq!(window.used, 0);
        assert_eq!(window.resets_at, at("2025-06-18T00:00:00Z"));
    }

    #[test]
    fn test_remaining_floors_at_zero() {
        let mut window = QuotaWindow::open(at("2025-06-15T14:00:00Z"));
        window.used = 120;
        assert_eq!(window.remaining(100), 0);
        assert_eq!(window.remaining(200), 80);
    }
}
