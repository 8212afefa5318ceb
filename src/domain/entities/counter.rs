//! Approximate usage counters.

use std::fmt;
use std::str::FromStr;

/// Kind of event an approximate counter tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    Visits,
    ShortenedUrls,
}

impl CounterKind {
    pub const ALL: [CounterKind; 2] = [CounterKind::Visits, CounterKind::ShortenedUrls];

    /// Value stored in the `approximate_counts.kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterKind::Visits => "VISITS",
            CounterKind::ShortenedUrls => "SHORTENED_URLS",
        }
    }
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VISITS" => Ok(CounterKind::Visits),
            "SHORTENED_URLS" => Ok(CounterKind::ShortenedUrls),
            other => Err(format!("unknown counter kind '{}'", other)),
        }
    }
}

/// Current value of one approximate counter.
///
/// May drift slightly from the exact row count when transactions are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproximateCount {
    pub kind: CounterKind,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_column_value() {
        for kind in CounterKind::ALL {
            assert_eq!(kind.as_str().parse::<CounterKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!("CLICKS".parse::<CounterKind>().is_err());
    }
}
