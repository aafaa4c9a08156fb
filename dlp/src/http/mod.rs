pub use google_cloud_gax::cancel::CancellationToken;
pub use google_cloud_gax::error::Error;

use google_cloud_gax::path;
use serde::Serialize;

pub mod content;
pub mod deidentify_templates;
pub mod dlp_client;
pub mod dlp_jobs;
pub mod info_types;
pub mod inspect_templates;
pub mod job_triggers;
pub mod transformations;

pub fn organization_path(organization: &str) -> String {
    path::organization_path(organization)
}

pub fn project_path(project: &str) -> String {
    path::project_path(project)
}

pub fn organization_inspect_template_path(organization: &str, template: &str) -> String {
    format!("{}/inspectTemplates/{}", path::organization_path(organization), template)
}

pub fn project_inspect_template_path(project: &str, template: &str) -> String {
    format!("{}/inspectTemplates/{}", path::project_path(project), template)
}

pub fn organization_deidentify_template_path(organization: &str, template: &str) -> String {
    format!("{}/deidentifyTemplates/{}", path::organization_path(organization), template)
}

pub fn project_deidentify_template_path(project: &str, template: &str) -> String {
    format!("{}/deidentifyTemplates/{}", path::project_path(project), template)
}

pub fn project_job_trigger_path(project: &str, job_trigger: &str) -> String {
    format!("{}/jobTriggers/{}", path::project_path(project), job_trigger)
}

pub fn dlp_job_path(project: &str, dlp_job: &str) -> String {
    format!("{}/dlpJobs/{}", path::project_path(project), dlp_job)
}

/// Splits `projects/{project}/dlpJobs/{dlp_job}` into the project and the job id.
pub fn parse_dlp_job_path(name: &str) -> Result<(&str, &str), Error> {
    let vars = path::parse("projects/{project}/dlpJobs/{dlp_job}", name)?;
    Ok((vars[0], vars[1]))
}

/// Splits `projects/{project}/jobTriggers/{job_trigger}` into the project and the trigger id.
pub fn parse_job_trigger_path(name: &str) -> Result<(&str, &str), Error> {
    let vars = path::parse("projects/{project}/jobTriggers/{job_trigger}", name)?;
    Ok((vars[0], vars[1]))
}

pub(crate) fn require(value: &str, name: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::InvalidArgument(format!("{name} is required")));
    }
    Ok(())
}

/// Top level attributes of `resource` that are set, sorted by name, minus `output_only`.
/// The result is the JSON form of a field mask, e.g. `displayName,inspectConfig`.
pub(crate) fn update_mask<T: Serialize>(resource: &T, output_only: &[&str]) -> Result<String, Error> {
    let value = serde_json::to_value(resource)?;
    let mut paths = vec![];
    if let serde_json::Value::Object(fields) = value {
        for (name, value) in fields {
            if value.is_null() || output_only.contains(&name.as_str()) {
                continue;
            }
            paths.push(name);
        }
    }
    if paths.is_empty() {
        return Err(Error::InvalidArgument("nothing to update".to_string()));
    }
    Ok(paths.join(","))
}

/// Protobuf durations, `86400s` on the wire.
pub mod duration {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_str(&format!("{}s", d.as_secs_f64())),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        let Some(v) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let secs = v
            .strip_suffix('s')
            .ok_or_else(|| de::Error::custom(format!("invalid duration {v}")))?
            .parse::<f64>()
            .map_err(de::Error::custom)?;
        Duration::try_from_secs_f64(secs).map(Some).map_err(de::Error::custom)
    }
}
