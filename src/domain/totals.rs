use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Activity, ActivityId, LogEntry, Member, MemberId, ValidationError};

pub const FALLBACK_DUTY_RATIO: f64 = 100.0;

/// Everything `compute_totals` reads, fetched from the store in one go.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogbookSnapshot {
    pub members: Vec<Member>,
    pub activities: Vec<Activity>,
    pub entries: Vec<LogEntry>,
}

/// Which activities count as duties and which only count towards the total.
///
/// `duty_ratio = 100 * duty / (duty + other)`, where each side is the sum of
/// a member's counts over the named activities.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioConfig {
    duty_activities: Vec<String>,
    other_activities: Vec<String>,
}

impl RatioConfig {
    pub fn new(
        duty_activities: Vec<String>,
        other_activities: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if duty_activities.is_empty() || other_activities.is_empty() {
            return Err(ValidationError::new(
                "Duty and other activity lists must not be empty".to_string(),
            ));
        }

        let duty: HashSet<&String> = duty_activities.iter().collect();
        if let Some(name) = other_activities.iter().find(|n| duty.contains(n))
        {
            return Err(ValidationError::new(format!(
                "Activity '{name}' cannot be both a duty and an other activity"
            )));
        }

        Ok(Self {
            duty_activities,
            other_activities,
        })
    }

    pub fn duty_activities(&self) -> &[String] {
        &self.duty_activities
    }

    pub fn other_activities(&self) -> &[String] {
        &self.other_activities
    }

    fn names(&self) -> impl Iterator<Item = &String> {
        self.duty_activities.iter().chain(self.other_activities.iter())
    }

    pub fn duty_ratio(&self, counts: &BTreeMap<String, usize>) -> f64 {
        let sum = |names: &[String]| -> usize {
            names
                .iter()
                .map(|name| counts.get(name).copied().unwrap_or(0))
                .sum()
        };
        let duty = sum(&self.duty_activities);
        let total = duty + sum(&self.other_activities);

        if total == 0 {
            return FALLBACK_DUTY_RATIO;
        }
        100.0 * duty as f64 / total as f64
    }
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            duty_activities: vec!["ood".to_string(), "safety".to_string()],
            other_activities: vec!["race".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberTotals {
    #[serde(rename = "memberId")]
    pub member_id: MemberId,
    #[serde(rename = "memberName")]
    pub member_name: String,
    pub counts: BTreeMap<String, usize>,
    #[serde(rename = "dutyRatio")]
    pub duty_ratio: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    #[error("Ratio activity '{0}' does not exist")]
    UnknownActivity(String),
}

/// One row per member with a count per activity and the member's duty ratio,
/// sorted ascending by duty ratio. Ties keep the snapshot's member order.
#[tracing::instrument(name = "Computing member totals", skip_all)]
pub fn compute_totals(
    snapshot: &LogbookSnapshot,
    config: &RatioConfig,
) -> Result<Vec<MemberTotals>, TotalsError> {
    let known: HashSet<&str> =
        snapshot.activities.iter().map(|a| a.name.as_str()).collect();
    if let Some(missing) = config.names().find(|n| !known.contains(n.as_str()))
    {
        return Err(TotalsError::UnknownActivity(missing.to_owned()));
    }

    let mut counter = HashMap::<(MemberId, ActivityId), usize>::new();
    for entry in &snapshot.entries {
        *counter.entry((entry.member_id, entry.activity_id)).or_default() += 1;
    }

    let mut totals: Vec<MemberTotals> = snapshot
        .members
        .iter()
        .map(|member| {
            let counts: BTreeMap<String, usize> = snapshot
                .activities
                .iter()
                .map(|activity| {
                    let count = counter
                        .get(&(member.id, activity.id))
                        .copied()
                        .unwrap_or(0);
                    (activity.name.clone(), count)
                })
                .collect();
            let duty_ratio = config.duty_ratio(&counts);

            MemberTotals {
                member_id: member.id,
                member_name: member.name.as_ref().to_owned(),
                counts,
                duty_ratio,
            }
        })
        .collect();

    totals.sort_by(|a, b| a.duty_ratio.total_cmp(&b.duty_ratio));
    tracing::debug!("computed totals for {} members", totals.len());

    Ok(totals)
}
