use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::inspect_templates::InspectTemplate;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspectTemplateRequest {
    /// `projects/{project}` or `organizations/{organization}`.
    #[serde(skip)]
    pub parent: String,
    pub inspect_template: InspectTemplate,
    /// `[a-zA-Z\d_-]+`, at most 100 characters. Generated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &CreateInspectTemplateRequest) -> RequestBuilder {
    let url = format!("{}/{}/inspectTemplates", base_url, req.parent);
    client.post(url).json(req)
}
