use time::OffsetDateTime;

use crate::http::content::InspectConfig;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod patch;

/// Attributes set by the service, never part of an update mask.
pub(crate) const OUTPUT_ONLY: [&str; 3] = ["name", "createTime", "updateTime"];

/// A reusable [`InspectConfig`].
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InspectTemplate {
    /// `projects/{project}/inspectTemplates/{id}` or `organizations/{organization}/inspectTemplates/{id}`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_config: Option<InspectConfig>,
}
