use std::collections::HashMap;

use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::bucket_access_controls::PredefinedBucketAcl;
use crate::http::buckets::insert::RetentionPolicyCreationConfig;
use crate::http::buckets::{Billing, Cors, Encryption, IamConfiguration, Lifecycle, Logging, Versioning, Website};
use crate::http::object_access_controls::insert::ObjectAccessControlCreationConfig;
use crate::http::object_access_controls::{PredefinedObjectAcl, Projection};
use crate::http::Escape;

/// Bucket attributes to change. `None` fields are left untouched.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BucketPatchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_object_acl: Option<Vec<ObjectAccessControlCreationConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Lifecycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<Vec<Cors>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_event_based_hold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<Website>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versioning: Option<Versioning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<Encryption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<Billing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_policy: Option<RetentionPolicyCreationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam_configuration: Option<IamConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpo: Option<String>,
}

/// Request for PatchBucket method.
#[derive(Clone, PartialEq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PatchBucketRequest {
    /// Required. Name of a bucket.
    #[serde(skip_serializing)]
    pub bucket: String,
    /// Makes the patch conditional on whether the bucket's current metageneration
    /// matches the given value.
    pub if_metageneration_match: Option<i64>,
    /// Makes the patch conditional on whether the bucket's current metageneration
    /// does not match the given value.
    pub if_metageneration_not_match: Option<i64>,
    /// Apply a predefined set of access controls to this bucket.
    pub predefined_acl: Option<PredefinedBucketAcl>,
    /// Apply a predefined set of default object access controls to this bucket.
    pub predefined_default_object_acl: Option<PredefinedObjectAcl>,
    /// Set of properties to return. Defaults to `FULL`.
    pub projection: Option<Projection>,
    /// The Bucket metadata for updating.
    #[serde(skip_serializing)]
    pub metadata: Option<BucketPatchConfig>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &PatchBucketRequest) -> RequestBuilder {
    let builder = patch(base_url, client, req);
    if let Some(body) = &req.metadata {
        builder.json(body)
    } else {
        builder
    }
}

/// Sends `body` as is, so attributes can also be cleared with `null`.
pub(crate) fn build_raw(
    base_url: &str,
    client: &Client,
    req: &PatchBucketRequest,
    body: &serde_json::Value,
) -> RequestBuilder {
    patch(base_url, client, req).json(body)
}

fn patch(base_url: &str, client: &Client, req: &PatchBucketRequest) -> RequestBuilder {
    let url = format!("{}/b/{}", base_url, req.bucket.escape());
    client.patch(url).query(&req)
}
