use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::bucket_access_controls::BucketAccessControl;
use crate::http::{Escape, UserProject};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBucketAccessControlsRequest {
    /// Name of a bucket.
    pub bucket: String,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBucketAccessControlsResponse {
    #[serde(default)]
    pub items: Vec<BucketAccessControl>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListBucketAccessControlsRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/acl", base_url, req.bucket.escape());
    client.get(url).user_project(&req.user_project)
}
