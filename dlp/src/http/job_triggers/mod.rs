use std::time::Duration;

use time::OffsetDateTime;

use crate::http::dlp_jobs::{DlpError, InspectJobConfig};

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod patch;

pub(crate) const OUTPUT_ONLY: [&str; 5] = ["name", "errors", "createTime", "updateTime", "lastRunTime"];

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Between one day and 60 days.
    #[serde(default, with = "crate::http::duration", skip_serializing_if = "Option::is_none")]
    pub recurrence_period_duration: Option<Duration>,
}

impl Schedule {
    pub fn every(period: Duration) -> Self {
        Self {
            recurrence_period_duration: Some(period),
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub schedule: Schedule,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobTriggerStatus {
    #[default]
    StatusUnspecified,
    Healthy,
    Paused,
    Cancelled,
}

/// Starts inspection jobs on a schedule.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobTrigger {
    /// `projects/{project}/jobTriggers/{id}`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_job: Option<InspectJobConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<Trigger>,
    /// The last 100 errors. Cleared when the trigger is updated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<DlpError>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_time: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_run_time: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobTriggerStatus>,
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use serde_json::json;

    use crate::http::job_triggers::{JobTrigger, JobTriggerStatus, Schedule, Trigger};

    #[test]
    fn test_job_trigger_json() {
        let trigger = JobTrigger {
            display_name: Some("nightly".to_string()),
            triggers: vec![Trigger {
                schedule: Schedule::every(Duration::from_secs(86400)),
            }],
            status: Some(JobTriggerStatus::Healthy),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&trigger).unwrap(),
            json!({
                "displayName": "nightly",
                "triggers": [{"schedule": {"recurrencePeriodDuration": "86400s"}}],
                "status": "HEALTHY"
            })
        );
    }
}
