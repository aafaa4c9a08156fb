use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::object_access_controls::ObjectAccessControl;
use crate::http::Escape;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListDefaultObjectAccessControlsRequest {
    /// Name of a bucket.
    #[serde(skip_serializing)]
    pub bucket: String,
    /// If present, only return default ACL listing if the bucket's current
    /// metageneration matches this value.
    pub if_metageneration_match: Option<i64>,
    /// If present, only return default ACL listing if the bucket's current
    /// metageneration does not match the given value.
    pub if_metageneration_not_match: Option<i64>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListDefaultObjectAccessControlsResponse {
    #[serde(default)]
    pub items: Vec<ObjectAccessControl>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &ListDefaultObjectAccessControlsRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/defaultObjectAcl", base_url, req.bucket.escape());
    client.get(url).query(&req)
}
