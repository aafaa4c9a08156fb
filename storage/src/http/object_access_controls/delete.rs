use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::Escape;

/// Request message for DeleteObjectAccessControl.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectAccessControlRequest {
    #[serde(skip_serializing)]
    pub bucket: String,
    #[serde(skip_serializing)]
    pub object: String,
    /// The entity holding the permission, e.g. `user-liz@example.com` or `allUsers`.
    #[serde(skip_serializing)]
    pub entity: String,
    /// If present, selects a specific revision of this object.
    pub generation: Option<i64>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &DeleteObjectAccessControlRequest) -> RequestBuilder {
    let url = format!(
        "{}/b/{}/o/{}/acl/{}",
        base_url,
        req.bucket.escape(),
        req.object.escape(),
        req.entity.escape()
    );
    client.delete(url).query(&req)
}
