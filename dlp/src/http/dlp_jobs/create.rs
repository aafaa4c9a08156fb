use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::dlp_jobs::{InspectJobConfig, RiskAnalysisJobConfig};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum JobConfig {
    InspectJob(InspectJobConfig),
    RiskJob(RiskAnalysisJobConfig),
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateDlpJobRequest {
    #[serde(skip)]
    pub parent: String,
    #[serde(flatten)]
    pub job: JobConfig,
    /// `[a-zA-Z\d_-]+`, at most 100 characters. Generated when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &CreateDlpJobRequest) -> RequestBuilder {
    let url = format!("{}/{}/dlpJobs", base_url, req.parent);
    client.post(url).json(req)
}
