use reqwest::header::CONTENT_LENGTH;
use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::job::Job;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CancelJobRequest {
    pub location: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CancelJobResponse {
    #[serde(default)]
    pub kind: String,
    /// The final state of the job may not be `DONE` yet, cancellation is asynchronous.
    pub job: Job,
}

pub(crate) fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    job_id: &str,
    data: &CancelJobRequest,
) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}/jobs/{job_id}/cancel");
    client.post(url).query(data).header(CONTENT_LENGTH, 0)
}
