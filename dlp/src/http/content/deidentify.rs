use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::content::{ContentItem, InspectConfig};
use crate::http::transformations::{DeidentifyConfig, TransformationOverview};

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyContentRequest {
    #[serde(skip)]
    pub parent: String,
    /// Overrides the matching settings of `deidentify_template_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deidentify_config: Option<DeidentifyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_config: Option<InspectConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ContentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deidentify_template_name: Option<String>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeidentifyContentResponse {
    pub item: ContentItem,
    pub overview: Option<TransformationOverview>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &DeidentifyContentRequest) -> RequestBuilder {
    let url = format!("{}/{}/content:deidentify", base_url, req.parent);
    client.post(url).json(req)
}
