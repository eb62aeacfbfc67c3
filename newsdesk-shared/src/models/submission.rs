use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::EnumIter;

/// Moderation state of a citizen submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A story tip sent in by a reader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Which submissions the moderation queue shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubmissionFilter {
    #[default]
    All,
    Only(SubmissionStatus),
}

impl SubmissionFilter {
    /// Value of the `status` query parameter, if one is sent.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status.as_str()),
        }
    }
}

impl FromStr for SubmissionFilter {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Only(SubmissionStatus::Pending)),
            "approved" => Ok(Self::Only(SubmissionStatus::Approved)),
            "rejected" => Ok(Self::Only(SubmissionStatus::Rejected)),
            _ => Err("unknown submission filter"),
        }
    }
}

/// Payload for `PATCH /submissions/:id/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionStatusUpdate {
    pub status: SubmissionStatus,
}

/// Per-status counts shown above the moderation queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl SubmissionStats {
    pub fn tally(submissions: &[Submission]) -> Self {
        submissions.iter().fold(
            Self {
                total: submissions.len(),
                ..Self::default()
            },
            |mut stats, submission| {
                match submission.status {
                    SubmissionStatus::Pending => stats.pending += 1,
                    SubmissionStatus::Approved => stats.approved += 1,
                    SubmissionStatus::Rejected => stats.rejected += 1,
                }
                stats
            },
        )
    }
}
