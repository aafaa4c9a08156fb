use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::inspect_templates::InspectTemplate;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListInspectTemplatesRequest {
    pub parent: String,
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListInspectTemplatesResponse {
    #[serde(default)]
    pub inspect_templates: Vec<InspectTemplate>,
    pub next_page_token: Option<String>,
}

impl Paginated for ListInspectTemplatesResponse {
    type Item = InspectTemplate;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.inspect_templates
    }
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListInspectTemplatesRequest) -> RequestBuilder {
    let url = format!("{}/{}/inspectTemplates", base_url, req.parent);
    let mut query = vec![];
    if let Some(page_size) = req.page_size {
        query.push(("pageSize", page_size.to_string()));
    }
    if let Some(page_token) = &req.page_token {
        query.push(("pageToken", page_token.clone()));
    }
    client.get(url).query(&query)
}
