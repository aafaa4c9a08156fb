use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::object_access_controls::{PredefinedObjectAcl, Projection};
use crate::http::objects::{Encryption, Object};
use crate::http::Escape;

/// Request message for CopyObject.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CopyObjectRequest {
    /// Name of the bucket in which to find the source object.
    #[serde(skip_serializing)]
    pub source_bucket: String,
    /// Name of the source object.
    #[serde(skip_serializing)]
    pub source_object: String,
    /// Name of the bucket in which to store the new object.
    #[serde(skip_serializing)]
    pub destination_bucket: String,
    /// Name of the new object.
    #[serde(skip_serializing)]
    pub destination_object: String,
    /// Apply a predefined set of access controls to the destination object.
    pub destination_predefined_acl: Option<PredefinedObjectAcl>,
    /// Resource name of the Cloud KMS key that will be used to encrypt the object.
    pub destination_kms_key_name: Option<String>,
    pub if_generation_match: Option<i64>,
    pub if_generation_not_match: Option<i64>,
    pub if_metageneration_match: Option<i64>,
    pub if_metageneration_not_match: Option<i64>,
    pub if_source_generation_match: Option<i64>,
    pub if_source_generation_not_match: Option<i64>,
    pub if_source_metageneration_match: Option<i64>,
    pub if_source_metageneration_not_match: Option<i64>,
    /// Set of properties to return. Defaults to `NO_ACL`.
    pub projection: Option<Projection>,
    /// If present, selects a specific revision of the source object.
    pub source_generation: Option<i64>,
    /// Metadata of the destination object. Unset attributes are copied from the source.
    #[serde(skip_serializing)]
    pub metadata: Option<Object>,
    /// Key of the destination object.
    #[serde(skip_serializing)]
    pub encryption: Option<Encryption>,
    /// Key of the source object.
    #[serde(skip_serializing)]
    pub source_encryption: Option<Encryption>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &CopyObjectRequest) -> RequestBuilder {
    let url = format!(
        "{}/b/{}/o/{}/copyTo/b/{}/o/{}",
        base_url,
        req.source_bucket.escape(),
        req.source_object.escape(),
        req.destination_bucket.escape(),
        req.destination_object.escape()
    );
    let mut builder = client.post(url).query(&req);
    builder = match &req.metadata {
        Some(metadata) => builder.json(metadata),
        None => builder.json(&serde_json::json!({})),
    };
    if let Some(e) = &req.encryption {
        builder = e.with_headers(builder);
    }
    if let Some(e) = &req.source_encryption {
        builder = e.with_copy_source_headers(builder);
    }
    builder
}
