use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::object_access_controls::ObjectAccessControl;
use crate::http::Escape;

/// Request message for ListObjectAccessControls.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectAccessControlsRequest {
    /// Name of the bucket in which the object resides.
    #[serde(skip_serializing)]
    pub bucket: String,
    /// Name of the object.
    #[serde(skip_serializing)]
    pub object: String,
    /// If present, selects a specific revision of this object.
    pub generation: Option<i64>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

/// The response to a call to ObjectAccessControls.ListObjectAccessControls.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectAccessControlsResponse {
    #[serde(default)]
    pub items: Vec<ObjectAccessControl>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListObjectAccessControlsRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/o/{}/acl", base_url, req.bucket.escape(), req.object.escape());
    client.get(url).query(&req)
}
