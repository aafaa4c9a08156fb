use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteJobRequest {
    pub location: Option<String>,
}

/// Deletes the metadata of a finished job. Deleting a script also deletes its child jobs.
pub(crate) fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    job_id: &str,
    data: &DeleteJobRequest,
) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}/jobs/{job_id}/delete");
    client.delete(url).query(data)
}
