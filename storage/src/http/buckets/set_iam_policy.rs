use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::buckets::Policy;
use crate::http::{Escape, UserProject};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetIamPolicyRequest {
    /// Name of the bucket.
    pub resource: String,
    /// The complete policy to be applied to the bucket.
    pub policy: Policy,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &SetIamPolicyRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/iam", base_url, req.resource.escape());
    client.put(url).user_project(&req.user_project).json(&req.policy)
}
