pub mod list;

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InfoTypeSupportedBy {
    #[default]
    EnumTypeUnspecified,
    Inspect,
    RiskAnalysis,
}

/// A built in detector.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InfoTypeDescription {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub supported_by: Vec<InfoTypeSupportedBy>,
}
