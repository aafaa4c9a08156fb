use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::job_triggers::JobTrigger;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct UpdateJobTriggerRequest {
    pub name: String,
    /// Only the attributes that are set are changed.
    pub job_trigger: JobTrigger,
    /// Overrides the mask computed from `job_trigger`.
    pub update_mask: Option<Vec<String>>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Body<'a> {
    job_trigger: &'a JobTrigger,
    update_mask: &'a str,
}

pub(crate) fn build(
    base_url: &str,
    client: &Client,
    req: &UpdateJobTriggerRequest,
    update_mask: &str,
) -> RequestBuilder {
    let url = format!("{}/{}", base_url, req.name);
    client.patch(url).json(&Body {
        job_trigger: &req.job_trigger,
        update_mask,
    })
}
