use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetIamPolicyRequest {
    /// Name of the bucket.
    #[serde(skip_serializing)]
    pub resource: String,
    /// The IAM policy format version to be returned. Version 3 is required for
    /// policies holding conditional bindings.
    pub options_requested_policy_version: Option<i32>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &GetIamPolicyRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/iam", base_url, req.resource.escape());
    client.get(url).query(&req)
}
