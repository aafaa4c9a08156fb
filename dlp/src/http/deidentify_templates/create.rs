use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::deidentify_templates::DeidentifyTemplate;

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeidentifyTemplateRequest {
    /// `projects/{project}` or `organizations/{organization}`.
    #[serde(skip)]
    pub parent: String,
    pub deidentify_template: DeidentifyTemplate,
    /// `[a-zA-Z\d_-]+`, at most 100 characters. Generated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &CreateDeidentifyTemplateRequest) -> RequestBuilder {
    let url = format!("{}/{}/deidentifyTemplates", base_url, req.parent);
    client.post(url).json(req)
}
