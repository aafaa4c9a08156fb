use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::{Escape, UserProject};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TestIamPermissionsRequest {
    /// Name of the bucket.
    pub resource: String,
    /// The permissions to check, e.g. `storage.buckets.get`.
    pub permissions: Vec<String>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

/// The subset of the requested permissions the caller holds.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TestIamPermissionsResponse {
    #[serde(default)]
    pub permissions: Vec<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &TestIamPermissionsRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/iam/testPermissions", base_url, req.resource.escape());
    let query: Vec<_> = req.permissions.iter().map(|x| ("permissions", x)).collect();
    client.get(url).query(&query).user_project(&req.user_project)
}
