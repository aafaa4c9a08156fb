use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::content::{ContentItem, InspectConfig};
use crate::http::transformations::{DeidentifyConfig, TransformationOverview};

/// Reverses a de-identification. Only reversible transformations are allowed in
/// `reidentify_config`.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReidentifyContentRequest {
    #[serde(skip)]
    pub parent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reidentify_config: Option<DeidentifyConfig>,
    /// Must find the surrogates, usually through a custom info type with a surrogate type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_config: Option<InspectConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ContentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_template_name: Option<String>,
    /// A deidentify template holding the reversible transformations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reidentify_template_name: Option<String>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReidentifyContentResponse {
    pub item: ContentItem,
    pub overview: Option<TransformationOverview>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ReidentifyContentRequest) -> RequestBuilder {
    let url = format!("{}/{}/content:reidentify", base_url, req.parent);
    client.post(url).json(req)
}
