use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::{Escape, UserProject};

/// Request message for DeleteBucketAccessControl.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBucketAccessControlRequest {
    /// Name of a bucket.
    pub bucket: String,
    /// The entity holding the permission. Can be `user-userId`, `user-emailAddress`,
    /// `group-groupId`, `group-emailAddress`, `allUsers`, or `allAuthenticatedUsers`.
    pub entity: String,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &DeleteBucketAccessControlRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/acl/{}", base_url, req.bucket.escape(), req.entity.escape());
    client.delete(url).user_project(&req.user_project)
}
