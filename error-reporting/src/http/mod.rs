pub use google_cloud_gax::cancel::CancellationToken;
pub use google_cloud_gax::error::Error;

use google_cloud_gax::path;

pub mod error_reporting_client;
pub mod events;
pub mod group_stats;
pub mod groups;

/// `projects/{project}`, the parent of every call.
pub fn project_path(project: &str) -> String {
    path::project_path(project)
}

/// `projects/{project}/groups/{group}`.
pub fn group_path(project: &str, group: &str) -> String {
    format!("{}/groups/{}", path::project_path(project), group)
}

/// Accepts a bare project id as well as `projects/{project}`.
pub(crate) fn project_name(name: &str) -> Result<String, Error> {
    if name.is_empty() {
        return Err(Error::InvalidArgument("project name is required".to_string()));
    }
    Ok(path::ensure_prefixed("projects", name))
}

/// Filters results by the service context of the events. Every unset field matches all.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceContextFilter {
    pub service: Option<String>,
    pub version: Option<String>,
    pub resource_type: Option<String>,
}

impl ServiceContextFilter {
    pub(crate) fn append_to(&self, query: &mut Vec<(&'static str, String)>) {
        if let Some(service) = &self.service {
            query.push(("serviceFilter.service", service.clone()));
        }
        if let Some(version) = &self.version {
            query.push(("serviceFilter.version", version.clone()));
        }
        if let Some(resource_type) = &self.resource_type {
            query.push(("serviceFilter.resourceType", resource_type.clone()));
        }
    }
}

/// Time windows of [`QueryTimeRange`], all ending now.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
pub enum Period {
    #[default]
    #[serde(rename = "PERIOD_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "PERIOD_1_HOUR")]
    OneHour,
    #[serde(rename = "PERIOD_6_HOURS")]
    SixHours,
    #[serde(rename = "PERIOD_1_DAY")]
    OneDay,
    #[serde(rename = "PERIOD_1_WEEK")]
    OneWeek,
    #[serde(rename = "PERIOD_30_DAYS")]
    ThirtyDays,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Unspecified => "PERIOD_UNSPECIFIED",
            Period::OneHour => "PERIOD_1_HOUR",
            Period::SixHours => "PERIOD_6_HOURS",
            Period::OneDay => "PERIOD_1_DAY",
            Period::OneWeek => "PERIOD_1_WEEK",
            Period::ThirtyDays => "PERIOD_30_DAYS",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryTimeRange {
    pub period: Period,
}

impl QueryTimeRange {
    pub fn new(period: Period) -> Self {
        Self { period }
    }

    pub(crate) fn append_to(&self, query: &mut Vec<(&'static str, String)>) {
        query.push(("timeRange.period", self.period.as_str().to_string()));
    }
}

/// `3600s`, the JSON form of a protobuf duration.
pub(crate) fn duration_param(duration: std::time::Duration) -> String {
    format!("{}s", duration.as_secs_f64())
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use crate::http::{duration_param, group_path, project_name, project_path, Period, ServiceContextFilter};

    #[test]
    fn test_paths() {
        assert_eq!(project_path("p"), "projects/p");
        assert_eq!(group_path("p", "g1"), "projects/p/groups/g1");
        assert_eq!(project_name("p").unwrap(), "projects/p");
        assert_eq!(project_name("projects/p").unwrap(), "projects/p");
        assert!(project_name("").is_err());
    }

    #[test]
    fn test_params() {
        assert_eq!(duration_param(Duration::from_secs(3600)), "3600s");
        assert_eq!(duration_param(Duration::from_millis(1500)), "1.5s");
        assert_eq!(Period::SixHours.as_str(), "PERIOD_6_HOURS");
        assert_eq!(
            serde_json::to_value(Period::ThirtyDays).unwrap(),
            serde_json::json!("PERIOD_30_DAYS")
        );

        let mut query = vec![];
        ServiceContextFilter {
            service: Some("api".to_string()),
            resource_type: Some("gae_app".to_string()),
            ..Default::default()
        }
        .append_to(&mut query);
        assert_eq!(
            query,
            vec![
                ("serviceFilter.service", "api".to_string()),
                ("serviceFilter.resourceType", "gae_app".to_string())
            ]
        );
    }
}
