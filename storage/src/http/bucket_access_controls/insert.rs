use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::bucket_access_controls::BucketACLRole;
use crate::http::{Escape, UserProject};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BucketAccessControlCreationConfig {
    pub entity: String,
    pub role: BucketACLRole,
}

/// Request message for InsertBucketAccessControl.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsertBucketAccessControlRequest {
    /// Name of a bucket.
    pub bucket: String,
    pub acl: BucketAccessControlCreationConfig,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &InsertBucketAccessControlRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/acl", base_url, req.bucket.escape());
    client.post(url).user_project(&req.user_project).json(&req.acl)
}
