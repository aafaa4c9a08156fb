use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::job_triggers::JobTrigger;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListJobTriggersRequest {
    pub parent: String,
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
    /// Comma separated fields such as `create_time desc, name`.
    pub order_by: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListJobTriggersResponse {
    #[serde(default)]
    pub job_triggers: Vec<JobTrigger>,
    pub next_page_token: Option<String>,
}

impl Paginated for ListJobTriggersResponse {
    type Item = JobTrigger;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.job_triggers
    }
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListJobTriggersRequest) -> RequestBuilder {
    let url = format!("{}/{}/jobTriggers", base_url, req.parent);
    let mut query = vec![];
    if let Some(page_size) = req.page_size {
        query.push(("pageSize", page_size.to_string()));
    }
    if let Some(page_token) = &req.page_token {
        query.push(("pageToken", page_token.clone()));
    }
    if let Some(order_by) = &req.order_by {
        query.push(("orderBy", order_by.clone()));
    }
    client.get(url).query(&query)
}
