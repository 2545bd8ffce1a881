use chrono::{DateTime, Utc};

/// Coarse age label: `"45m ago"`, `"3h ago"`, `"2d ago"`.
///
/// Timestamps in the future are reported as `"0m ago"`.
pub fn time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - published).num_minutes().max(0);
    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

/// Compact share count: `"0"`, `"950"`, `"2.8k"`, `"1.2m"`.
pub fn compact_count(shares: Option<u64>) -> String {
    match shares {
        None | Some(0) => "0".to_string(),
        Some(n) if n < 1_000 => n.to_string(),
        // 999_950 and up would round to "1000.0k".
        Some(n) if n < 999_950 => format!("{:.1}k", n as f64 / 1_000.0),
        Some(n) => format!("{:.1}m", n as f64 / 1_000_000.0),
    }
}

/// Trust band for a credibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredibilityTier {
    Unknown,
    Low,
    Medium,
    High,
}

impl CredibilityTier {
    pub fn from_score(score: Option<u8>) -> Self {
        match score {
            None | Some(0) => CredibilityTier::Unknown,
            Some(s) if s >= 90 => CredibilityTier::High,
            Some(s) if s >= 75 => CredibilityTier::Medium,
            Some(_) => CredibilityTier::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CredibilityTier::Unknown => "unrated",
            CredibilityTier::Low => "low",
            CredibilityTier::Medium => "medium",
            CredibilityTier::High => "high",
        }
    }
}
