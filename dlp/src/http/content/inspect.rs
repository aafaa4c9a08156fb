use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::content::{ContentItem, InspectConfig, InspectResult};

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InspectContentRequest {
    /// `projects/{project}`, optionally followed by `/locations/{location}`.
    #[serde(skip)]
    pub parent: String,
    /// Overrides the matching settings of `inspect_template_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_config: Option<InspectConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ContentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_template_name: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InspectContentResponse {
    #[serde(default)]
    pub result: InspectResult,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &InspectContentRequest) -> RequestBuilder {
    let url = format!("{}/{}/content:inspect", base_url, req.parent);
    client.post(url).json(req)
}
