use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::job_triggers::JobTrigger;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobTriggerRequest {
    /// `projects/{project}` or `organizations/{organization}`.
    #[serde(skip)]
    pub parent: String,
    pub job_trigger: JobTrigger,
    /// `[a-zA-Z\d_-]+`, at most 100 characters. Generated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_id: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &CreateJobTriggerRequest) -> RequestBuilder {
    let url = format!("{}/{}/jobTriggers", base_url, req.parent);
    client.post(url).json(req)
}
