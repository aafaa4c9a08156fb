use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::{Escape, UserProject};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDefaultObjectAccessControlRequest {
    #[serde(skip_serializing)]
    pub bucket: String,
    #[serde(skip_serializing)]
    pub entity: String,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &DeleteDefaultObjectAccessControlRequest) -> RequestBuilder {
    let url = format!("{}/b/{}/defaultObjectAcl/{}", base_url, req.bucket.escape(), req.entity.escape());
    client.delete(url).user_project(&req.user_project)
}
