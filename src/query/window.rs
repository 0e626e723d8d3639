//! Relative time-range tokens (`30m`, `24h`, `2d`)
//!
//! A token resolves two ways: as a relative predicate the search backend
//! evaluates itself, or as an absolute `[start, end]` pair for the alert API,
//! which has no notion of "now".

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};

/// Time range used when the caller does not supply one
pub const DEFAULT_TIME_RANGE: &str = "1h";

/// Longest accepted look-back; anything larger is treated as malformed
pub const MAX_LOOKBACK_DAYS: i64 = 100 * 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'm' => Some(TimeUnit::Minutes),
            'h' => Some(TimeUnit::Hours),
            'd' => Some(TimeUnit::Days),
            _ => None,
        }
    }

    fn duration(self, amount: i64) -> Option<Duration> {
        match self {
            TimeUnit::Minutes => Duration::try_minutes(amount),
            TimeUnit::Hours => Duration::try_hours(amount),
            TimeUnit::Days => Duration::try_days(amount),
        }
    }
}

/// A parsed time-range token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    /// Trimmed token, or `DEFAULT_TIME_RANGE` when defaulted
    token: String,
    duration: Duration,
    /// True when the token was malformed and one hour was substituted
    defaulted: bool,
}

impl TimeRange {
    /// Parse a token. Malformed input never fails; it becomes one hour.
    pub fn parse(token: &str) -> Self {
        match Self::parse_duration(token) {
            Some(duration) => Self {
                token: token.trim().to_string(),
                duration,
                defaulted: false,
            },
            None => {
                tracing::warn!(
                    time_range = %token,
                    "Unrecognized time range, falling back to 1 hour"
                );
                Self {
                    token: DEFAULT_TIME_RANGE.to_string(),
                    duration: Duration::hours(1),
                    defaulted: true,
                }
            }
        }
    }

    fn parse_duration(token: &str) -> Option<Duration> {
        let token = token.trim();
        let unit_char = token.chars().last()?;
        let unit = TimeUnit::from_char(unit_char)?;
        let amount: i64 = token[..token.len() - unit_char.len_utf8()].trim().parse().ok()?;
        if amount <= 0 {
            return None;
        }
        unit.duration(amount).filter(|d| *d <= Duration::days(MAX_LOOKBACK_DAYS))
    }

    /// Effective token, `1h` when the input was malformed
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_defaulted(&self) -> bool {
        self.defaulted
    }

    /// Backend-evaluated predicate, e.g. `time=rtp(now,24h)-u`
    pub fn relative_filter(&self) -> String {
        format!("time=rtp(now,{})-u", self.token)
    }

    /// Absolute window ending now
    pub fn absolute_bounds(&self) -> TimeWindow {
        self.absolute_bounds_at(Utc::now())
    }

    /// Absolute window ending at `now`, truncated to whole seconds
    pub fn absolute_bounds_at(&self, now: DateTime<Utc>) -> TimeWindow {
        let end = now.trunc_subsecs(0);
        let start = end
            .checked_sub_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        TimeWindow { start, end }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::parse(DEFAULT_TIME_RANGE)
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}

/// Literal start/end pair computed client-side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
