use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::dlp_jobs::{DlpJob, DlpJobType};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListDlpJobsRequest {
    pub parent: String,
    /// e.g. `state = DONE AND trigger_name = projects/p/jobTriggers/daily`.
    pub filter: Option<String>,
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
    /// Inspection jobs when unset.
    pub job_type: Option<DlpJobType>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListDlpJobsResponse {
    #[serde(default)]
    pub jobs: Vec<DlpJob>,
    pub next_page_token: Option<String>,
}

impl Paginated for ListDlpJobsResponse {
    type Item = DlpJob;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.jobs
    }
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListDlpJobsRequest) -> RequestBuilder {
    let url = format!("{}/{}/dlpJobs", base_url, req.parent);
    let mut query = vec![];
    if let Some(filter) = &req.filter {
        query.push(("filter", filter.clone()));
    }
    if let Some(page_size) = req.page_size {
        query.push(("pageSize", page_size.to_string()));
    }
    if let Some(page_token) = &req.page_token {
        query.push(("pageToken", page_token.clone()));
    }
    if let Some(job_type) = req.job_type {
        query.push(("type", job_type.as_str().to_string()));
    }
    client.get(url).query(&query)
}
