pub mod get;
pub mod update;

/// Resolution state of an error group.
#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionStatus {
    #[default]
    ResolutionStatusUnspecified,
    /// The default for new groups.
    Open,
    Acknowledged,
    /// Reopened automatically when a new event arrives.
    Resolved,
    /// Stays muted even when new events arrive.
    Muted,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackingIssue {
    pub url: String,
}

/// Error events grouped by similarity.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorGroup {
    /// `projects/{project}/groups/{group}`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracking_issues: Vec<TrackingIssue>,
    #[serde(default)]
    pub resolution_status: ResolutionStatus,
}
