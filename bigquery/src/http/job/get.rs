use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetJobRequest {
    /// Required for jobs outside the US and EU multi-regions.
    pub location: Option<String>,
}

pub(crate) fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    job_id: &str,
    data: &GetJobRequest,
) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}/jobs/{job_id}");
    client.get(url).query(data)
}
