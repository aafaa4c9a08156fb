use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::deidentify_templates::DeidentifyTemplate;

#[derive(Clone, PartialEq, Debug, Default)]
pub struct ListDeidentifyTemplatesRequest {
    pub parent: String,
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListDeidentifyTemplatesResponse {
    #[serde(default)]
    pub deidentify_templates: Vec<DeidentifyTemplate>,
    pub next_page_token: Option<String>,
}

impl Paginated for ListDeidentifyTemplatesResponse {
    type Item = DeidentifyTemplate;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.deidentify_templates
    }
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListDeidentifyTemplatesRequest) -> RequestBuilder {
    let url = format!("{}/{}/deidentifyTemplates", base_url, req.parent);
    let mut query = vec![];
    if let Some(page_size) = req.page_size {
        query.push(("pageSize", page_size.to_string()));
    }
    if let Some(page_token) = &req.page_token {
        query.push(("pageToken", page_token.clone()));
    }
    client.get(url).query(&query)
}
