use std::collections::HashMap;

use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::bucket_access_controls::insert::BucketAccessControlCreationConfig;
use crate::http::bucket_access_controls::PredefinedBucketAcl;
use crate::http::buckets::{Billing, Cors, Encryption, IamConfiguration, Lifecycle, Logging, Versioning, Website};
use crate::http::object_access_controls::insert::ObjectAccessControlCreationConfig;
use crate::http::object_access_controls::{PredefinedObjectAcl, Projection};

/// Writable attributes of a new bucket.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BucketCreationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<Vec<BucketAccessControlCreationConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_object_acl: Option<Vec<ObjectAccessControlCreationConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Lifecycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<Vec<Cors>>,
    /// The location of the bucket. Defaults to `US`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
    pub default_event_based_hold: bool,
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

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPolicyCreationConfig {
    /// The duration in seconds that objects need to be retained.
    pub retention_period: u64,
}

#[derive(Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InsertBucketParam {
    /// Required. A valid API project identifier.
    pub project: String,
    /// Apply a predefined set of access controls to this bucket.
    pub predefined_acl: Option<PredefinedBucketAcl>,
    /// Apply a predefined set of default object access controls to this bucket.
    pub predefined_default_object_acl: Option<PredefinedObjectAcl>,
    /// Set of properties to return. Defaults to `NO_ACL`,
    /// unless the bucket resource specifies `acl` or `defaultObjectAcl`.
    pub projection: Option<Projection>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

/// Request message for InsertBucket.
#[derive(Clone, PartialEq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InsertBucketRequest {
    /// Name of the new bucket.
    pub name: String,
    #[serde(skip_serializing)]
    pub param: InsertBucketParam,
    #[serde(flatten)]
    pub bucket: BucketCreationConfig,
}

pub(crate) fn build(base_url: &str, client: &Client, req: &InsertBucketRequest) -> RequestBuilder {
    let url = format!("{base_url}/b");
    client.post(url).query(&req.param).json(&req)
}
