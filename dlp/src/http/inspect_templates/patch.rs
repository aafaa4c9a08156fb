use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::inspect_templates::InspectTemplate;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct UpdateInspectTemplateRequest {
    pub name: String,
    /// Only the attributes that are set are changed.
    pub inspect_template: InspectTemplate,
    /// Overrides the mask computed from `inspect_template`.
    pub update_mask: Option<Vec<String>>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Body<'a> {
    inspect_template: &'a InspectTemplate,
    update_mask: &'a str,
}

pub(crate) fn build(
    base_url: &str,
    client: &Client,
    req: &UpdateInspectTemplateRequest,
    update_mask: &str,
) -> RequestBuilder {
    let url = format!("{}/{}", base_url, req.name);
    client.patch(url).json(&Body {
        inspect_template: &req.inspect_template,
        update_mask,
    })
}
