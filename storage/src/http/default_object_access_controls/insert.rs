use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::object_access_controls::insert::ObjectAccessControlCreationConfig;
use crate::http::{Escape, UserProject};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsertDefaultObjectAccessControlRequest {
    pub bucket: String,
    pub object_access_control: ObjectAccessControlCreationConfig,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &InsertDefaultObjectAccessControlRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/defaultObjectAcl", base_url, req.bucket.escape());
    client.post(url)
        .user_project(&req.user_project)
        .json(&req.object_access_control)
}
