use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::job::Job;

/// Starts a resumable upload session of a load job. The `Location` header of the response
/// is the session URL the data is sent to.
pub(crate) fn build_resumable_session(base_url: &str, client: &Client, data: &Job) -> RequestBuilder {
    let url = format!("{}/projects/{}/jobs", base_url, data.job_reference.project_id);
    client
        .post(url)
        .query(&[("uploadType", "resumable")])
        .header("X-Upload-Content-Type", "application/octet-stream")
        .json(data)
}
