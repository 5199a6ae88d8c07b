use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ActivityId, MemberId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntryId(i32);

impl EntryId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl AsRef<i32> for EntryId {
    fn as_ref(&self) -> &i32 {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: EntryId,
    #[serde(rename = "memberId")]
    pub member_id: MemberId,
    #[serde(rename = "activityId")]
    pub activity_id: ActivityId,
    pub date: NaiveDate,
}

/// A log entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    pub member_id: MemberId,
    pub activity_id: ActivityId,
    pub date: NaiveDate,
}

impl NewLogEntry {
    pub fn new(
        member_id: MemberId,
        activity_id: ActivityId,
        date: NaiveDate,
    ) -> Self {
        Self {
            member_id,
            activity_id,
            date,
        }
    }
}

/// A log entry joined with the names of its member and activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntryDetails {
    pub id: EntryId,
    #[serde(rename = "memberId")]
    pub member_id: MemberId,
    #[serde(rename = "memberName")]
    pub member_name: String,
    #[serde(rename = "activityId")]
    pub activity_id: ActivityId,
    #[serde(rename = "activityName")]
    pub activity_name: String,
    pub date: NaiveDate,
}
