use chrono::{DateTime, Utc};
use std::fmt;

/// Age of a timestamp bucketed into the tiers shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAge {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
}

/// Buckets `then` relative to `now`. Each tier floors the previous one, so
/// 90 minutes is one hour and 50 hours is two days. Timestamps in the future
/// count as just now.
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> RelativeAge {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return RelativeAge::JustNow;
    }
    if minutes < 60 {
        return RelativeAge::Minutes(minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return RelativeAge::Hours(hours);
    }
    RelativeAge::Days(hours / 24)
}

impl RelativeAge {
    /// Card wording, e.g. `Active 12m ago`.
    pub fn activity_label(self) -> String {
        match self {
            RelativeAge::JustNow => "Active now".to_string(),
            other => format!("Active {other}"),
        }
    }
}

impl fmt::Display for RelativeAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeAge::JustNow => f.write_str("just now"),
            RelativeAge::Minutes(m) => write!(f, "{m}m ago"),
            RelativeAge::Hours(h) => write!(f, "{h}h ago"),
            RelativeAge::Days(d) => write!(f, "{d}d ago"),
        }
    }
}
