use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::paging::Paginated;

use crate::http::job::{JobConfiguration, JobReference, JobState, JobStatistics, JobStatus};
use crate::http::types::ErrorProto;

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub enum Projection {
    /// Does not include the job configuration.
    #[default]
    Minimal,
    Full,
}

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum StateFilter {
    Done,
    Pending,
    Running,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsRequest {
    /// Whether to display jobs owned by all users in the project. Default False.
    pub all_users: Option<bool>,
    pub max_results: Option<i64>,
    /// Milliseconds since the epoch.
    pub min_creation_time: Option<u64>,
    pub max_creation_time: Option<u64>,
    pub projection: Option<Projection>,
    pub state_filter: Option<StateFilter>,
    /// If set, show only child jobs of the specified parent.
    pub parent_job_id: Option<String>,
    pub page_token: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct JobOverview {
    pub id: String,
    pub kind: String,
    pub job_reference: JobReference,
    pub state: JobState,
    pub error_result: Option<ErrorProto>,
    pub statistics: Option<JobStatistics>,
    pub configuration: Option<JobConfiguration>,
    pub status: Option<JobStatus>,
    pub user_email: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ListJobsResponse {
    pub etag: String,
    pub kind: String,
    pub next_page_token: Option<String>,
    pub jobs: Vec<JobOverview>,
}

impl Paginated for ListJobsResponse {
    type Item = JobOverview;

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.jobs
    }
}

pub(crate) fn build(base_url: &str, client: &Client, project_id: &str, data: &ListJobsRequest) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}/jobs");
    client.get(url).query(data)
}
