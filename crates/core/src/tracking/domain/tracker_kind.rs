use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unsupported tracker '{0}' (expected one of: {names})", names = TrackerKind::names().join(", "))]
pub struct TrackerKindError(pub String);

/// Tracking algorithms selectable by name on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrackerKind {
    Csrt,
    #[default]
    Kcf,
    Boosting,
    Mil,
    Tld,
    MedianFlow,
    Mosse,
}

impl TrackerKind {
    pub const ALL: [TrackerKind; 7] = [
        TrackerKind::Csrt,
        TrackerKind::Kcf,
        TrackerKind::Boosting,
        TrackerKind::Mil,
        TrackerKind::Tld,
        TrackerKind::MedianFlow,
        TrackerKind::Mosse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TrackerKind::Csrt => "csrt",
            TrackerKind::Kcf => "kcf",
            TrackerKind::Boosting => "boosting",
            TrackerKind::Mil => "mil",
            TrackerKind::Tld => "tld",
            TrackerKind::MedianFlow => "medianflow",
            TrackerKind::Mosse => "mosse",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.name()).collect()
    }
}

impl FromStr for TrackerKind {
    type Err = TrackerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| TrackerKindError(s.to_string()))
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
