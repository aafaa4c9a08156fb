use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::object_access_controls::{PredefinedObjectAcl, Projection};
use crate::http::objects::{Encryption, Object};
use crate::http::Escape;

/// Request message for RewriteObject. A large rewrite spans several calls, each
/// passing the `rewrite_token` of the previous response.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RewriteObjectRequest {
    /// Name of the bucket in which to store the new object.
    #[serde(skip_serializing)]
    pub destination_bucket: String,
    /// Name of the new object.
    #[serde(skip_serializing)]
    pub destination_object: String,
    /// Name of the bucket in which to find the source object.
    #[serde(skip_serializing)]
    pub source_bucket: String,
    /// Name of the source object.
    #[serde(skip_serializing)]
    pub source_object: String,
    pub if_generation_match: Option<i64>,
    pub if_generation_not_match: Option<i64>,
    pub if_metageneration_match: Option<i64>,
    pub if_metageneration_not_match: Option<i64>,
    pub if_source_generation_match: Option<i64>,
    pub if_source_generation_not_match: Option<i64>,
    pub if_source_metageneration_match: Option<i64>,
    pub if_source_metageneration_not_match: Option<i64>,
    /// Resource name of the Cloud KMS key that will be used to encrypt the object.
    pub destination_kms_key_name: Option<String>,
    /// Apply a predefined set of access controls to the destination object.
    pub destination_predefined_acl: Option<PredefinedObjectAcl>,
    /// The maximum number of bytes that will be rewritten per rewrite request.
    pub max_bytes_rewritten_per_call: Option<i64>,
    /// Set of properties to return. Defaults to `NO_ACL`.
    pub projection: Option<Projection>,
    /// If present, selects a specific revision of the source object.
    pub source_generation: Option<i64>,
    /// Include this field (from the previous rewrite response) on each rewrite
    /// request after the first one, until the rewrite response 'done' flag is true.
    pub rewrite_token: Option<String>,
    /// Properties of the destination, post-rewrite object.
    #[serde(skip_serializing)]
    pub destination_metadata: Option<Object>,
    #[serde(skip_serializing)]
    pub source_encryption: Option<Encryption>,
    #[serde(skip_serializing)]
    pub destination_encryption: Option<Encryption>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

/// A rewrite response.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RewriteObjectResponse {
    /// The total bytes written so far, which can be used to provide a waiting user
    /// with a progress indicator. This property is always present in the response.
    #[serde(deserialize_with = "google_cloud_gax::http::from_str")]
    pub total_bytes_rewritten: i64,
    /// The total size of the object being copied in bytes.
    #[serde(deserialize_with = "google_cloud_gax::http::from_str")]
    pub object_size: i64,
    /// `true` if the copy is finished; otherwise, `false` if
    /// the copy is in progress. This property is always present in the response.
    pub done: bool,
    /// A token to use in subsequent requests to continue copying data. This token
    /// is present in the response only when there is more data to copy.
    pub rewrite_token: Option<String>,
    /// A resource containing the metadata for the copied-to object. This property
    /// is present in the response only when copying completes.
    pub resource: Option<Object>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &RewriteObjectRequest) -> RequestBuilder {
    let url = format!(
        "{}/b/{}/o/{}/rewriteTo/b/{}/o/{}",
        base_url,
        req.source_bucket.escape(),
        req.source_object.escape(),
        req.destination_bucket.escape(),
        req.destination_object.escape()
    );
    let mut builder = client.post(url).query(&req);
    builder = match &req.destination_metadata {
        Some(metadata) => builder.json(metadata),
        None => builder.json(&serde_json::json!({})),
    };
    if let Some(e) = &req.destination_encryption {
        builder = e.with_headers(builder)
    }
    if let Some(e) = &req.source_encryption {
        builder = e.with_copy_source_headers(builder)
    }
    builder
}
