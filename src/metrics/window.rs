use chrono::{DateTime, Duration, Utc};

/// Symbolic query window, resolved against "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    OneHour,
    SixHours,
    TwelveHours,
    TwentyFourHours,
    SevenDays,
    ThirtyDays,
}

impl TimeRange {
    /// Parse a range token. Total: unrecognized or empty tokens fall back to
    /// the 24h default instead of erroring, so a mistyped token is
    /// indistinguishable from the default window.
    pub fn parse(token: &str) -> Self {
        match token {
            "1h" => Self::OneHour,
            "6h" => Self::SixHours,
            "12h" => Self::TwelveHours,
            "24h" => Self::TwentyFourHours,
            "7d" => Self::SevenDays,
            "30d" => Self::ThirtyDays,
            _ => Self::TwentyFourHours,
        }
    }

    /// Lower bound of the window ending at `now`.
    pub fn window_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let span = match self {
            Self::OneHour => Duration::hours(1),
            Self::SixHours => Duration::hours(6),
            Self::TwelveHours => Duration::hours(12),
            Self::TwentyFourHours => Duration::hours(24),
            Self::SevenDays => Duration::days(7),
            Self::ThirtyDays => Duration::days(30),
        };
        now - span
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::TwentyFourHours
    }
}
