use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::object_access_controls::ObjectACLRole;
use crate::http::Escape;

/// Request message for InsertObjectAccessControl.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InsertObjectAccessControlRequest {
    /// Name of the bucket.
    #[serde(skip_serializing)]
    pub bucket: String,
    /// Name of the object.
    #[serde(skip_serializing)]
    pub object: String,
    /// If present, selects a specific revision of this object.
    pub generation: Option<i64>,
    #[serde(skip_serializing)]
    pub acl: ObjectAccessControlCreationConfig,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAccessControlCreationConfig {
    pub entity: String,
    pub role: ObjectACLRole,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &InsertObjectAccessControlRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/o/{}/acl", base_url, req.bucket.escape(), req.object.escape());
    client.post(url).query(&req).json(&req.acl)
}
