use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::object_access_controls::Projection;
use crate::http::Escape;

/// Request message for GetBucket.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetBucketRequest {
    /// Required. Name of a bucket.
    #[serde(skip_serializing)]
    pub bucket: String,
    /// Makes the return of the bucket metadata conditional on whether the bucket's
    /// current metageneration matches the given value.
    pub if_metageneration_match: Option<i64>,
    /// Makes the return of the bucket metadata conditional on whether the bucket's
    /// current metageneration does not match the given value.
    pub if_metageneration_not_match: Option<i64>,
    /// Set of properties to return. Defaults to `NO_ACL`.
    pub projection: Option<Projection>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &GetBucketRequest) -> RequestBuilder {
    let url = format!("{}/b/{}", base_url, req.bucket.escape());
    client.get(url).query(&req)
}
