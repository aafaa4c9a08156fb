use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::deidentify_templates::DeidentifyTemplate;

#[derive(Clone, PartialEq, Debug, Default)]
pub struct UpdateDeidentifyTemplateRequest {
    pub name: String,
    /// Only the attributes that are set are changed.
    pub deidentify_template: DeidentifyTemplate,
    /// Overrides the mask computed from `deidentify_template`.
    pub update_mask: Option<Vec<String>>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Body<'a> {
    deidentify_template: &'a DeidentifyTemplate,
    update_mask: &'a str,
}

pub(crate) fn build(
    base_url: &str,
    client: &Client,
    req: &UpdateDeidentifyTemplateRequest,
    update_mask: &str,
) -> RequestBuilder {
    let url = format!("{}/{}", base_url, req.name);
    client.patch(url).json(&Body {
        deidentify_template: &req.deidentify_template,
        update_mask,
    })
}
