use std::collections::HashMap;

use time::OffsetDateTime;

use crate::http::bucket_access_controls::BucketAccessControl;
use crate::http::object_access_controls::ObjectAccessControl;
use crate::http::objects::Owner;

pub mod delete;
pub mod get;
pub mod get_iam_policy;
pub mod insert;
pub mod list;
pub mod patch;
pub mod set_iam_policy;
pub mod test_iam_permissions;

/// A bucket.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct Bucket {
    /// Access controls on the bucket.
    pub acl: Option<Vec<BucketAccessControl>>,
    /// Default access controls to apply to new objects when no ACL is provided.
    pub default_object_acl: Option<Vec<ObjectAccessControl>>,
    /// The bucket's lifecycle configuration. See
    /// [Lifecycle Management](https://developers.google.com/storage/docs/lifecycle)
    /// for more information.
    pub lifecycle: Option<Lifecycle>,
    /// The creation time of the bucket in RFC 3339 format.
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_created: Option<OffsetDateTime>,
    /// The ID of the bucket. For buckets, the `id` and `name` properties are the same.
    pub id: String,
    /// The name of the bucket.
    pub name: String,
    /// The project number of the project the bucket belongs to.
    #[serde(deserialize_with = "google_cloud_gax::http::from_str")]
    pub project_number: i64,
    /// The metadata generation of this bucket.
    #[serde(deserialize_with = "google_cloud_gax::http::from_str")]
    pub metageneration: i64,
    /// The bucket's [Cross-Origin Resource Sharing](https://www.w3.org/TR/cors/)
    /// (CORS) configuration.
    pub cors: Option<Vec<Cors>>,
    /// The location of the bucket. Defaults to `US`.
    pub location: String,
    /// The bucket's default storage class, used whenever no storageClass is
    /// specified for a newly-created object.
    /// If this value is not specified when the bucket is created, it will default
    /// to `STANDARD`.
    pub storage_class: String,
    /// HTTP 1.1 Entity tag for the bucket.
    pub etag: String,
    /// The modification time of the bucket.
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated: Option<OffsetDateTime>,
    /// The default value for event-based hold on newly created objects in this
    /// bucket. Objects under event-based hold cannot be deleted, overwritten or
    /// archived until the hold is removed.
    pub default_event_based_hold: Option<bool>,
    /// User-provided labels, in key/value pairs.
    pub labels: Option<HashMap<String, String>>,
    /// The bucket's website configuration.
    pub website: Option<Website>,
    /// The bucket's versioning configuration.
    pub versioning: Option<Versioning>,
    /// The bucket's logging configuration, which defines the destination bucket
    /// and optional name prefix for the current bucket's logs.
    pub logging: Option<Logging>,
    /// The owner of the bucket. This is always the project team's owner group.
    pub owner: Option<Owner>,
    /// Encryption configuration for a bucket.
    pub encryption: Option<Encryption>,
    /// The bucket's billing configuration.
    pub billing: Option<Billing>,
    /// The bucket's retention policy. Any attempt to overwrite or delete objects
    /// younger than the retention period will result in a PERMISSION_DENIED error.
    pub retention_policy: Option<RetentionPolicy>,
    /// The location type of the bucket (region, dual-region, multi-region, etc).
    pub location_type: String,
    /// The recovery point objective for cross-region replication of the bucket.
    pub rpo: Option<String>,
    /// The bucket's IAM configuration.
    pub iam_configuration: Option<IamConfiguration>,
}

/// Billing properties of a bucket.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    /// When set to true, Requester Pays is enabled for this bucket.
    pub requester_pays: bool,
}

/// Cross-Origin Response sharing (CORS) properties for a bucket.
/// For more on GCS and CORS, see <https://cloud.google.com/storage/docs/cross-origin>.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Cors {
    /// The list of Origins eligible to receive CORS response headers.
    /// Note: "*" is permitted in the list of origins, and means "any Origin".
    pub origin: Vec<String>,
    /// The list of HTTP methods on which to include CORS response headers.
    pub method: Vec<String>,
    /// The list of HTTP headers other than the simple response headers to give
    /// permission for the user-agent to share across domains.
    pub response_header: Vec<String>,
    /// The value, in seconds, to return in the Access-Control-Max-Age header.
    pub max_age_seconds: i32,
}

/// Encryption properties of a bucket.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Encryption {
    /// A Cloud KMS key that will be used to encrypt objects inserted into this
    /// bucket, if no encryption method is specified.
    pub default_kms_key_name: String,
}

/// Bucket restriction options currently enforced on the bucket.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct IamConfiguration {
    pub uniform_bucket_level_access: Option<iam_configuration::UniformBucketLevelAccess>,
    /// Whether IAM will enforce public access prevention.
    pub public_access_prevention: Option<iam_configuration::PublicAccessPrevention>,
}

pub mod iam_configuration {
    use time::OffsetDateTime;

    #[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct UniformBucketLevelAccess {
        /// If set, access checks only use bucket-level IAM policies or above.
        pub enabled: bool,
        /// The deadline time for changing `enabled` from true to false.
        /// After the deadline is passed the field is immutable.
        #[serde(default, with = "time::serde::rfc3339::option")]
        pub locked_time: Option<OffsetDateTime>,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub enum PublicAccessPrevention {
        /// Prevents access from being granted to public members `allUsers` and `allAuthenticatedUsers`.
        Enforced,
        /// This setting is inherited from Org Policy.
        Inherited,
        /// The setting was never configured.
        Unspecified,
    }
}

/// Lifecycle properties of a bucket.
/// For more information, see <https://cloud.google.com/storage/docs/lifecycle>.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    /// A lifecycle management rule, which is made of an action to take and the
    /// condition(s) under which the action will be taken.
    #[serde(default)]
    pub rule: Vec<lifecycle::Rule>,
}

pub mod lifecycle {
    /// A lifecycle Rule, combining an action to take on an object and a
    /// condition which will trigger that action.
    #[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct Rule {
        pub action: Option<rule::Action>,
        pub condition: Option<rule::Condition>,
    }

    pub mod rule {
        use time::Date;

        #[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, Default)]
        pub enum ActionType {
            /// Deletes an object.
            #[default]
            Delete,
            /// Sets the `storage_class` of an object.
            SetStorageClass,
            /// Aborts incomplete multipart uploads.
            AbortIncompleteMultipartUpload,
        }

        #[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
        #[serde(rename_all = "camelCase")]
        pub struct Action {
            pub r#type: ActionType,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub storage_class: Option<String>,
        }

        /// A condition of an object which triggers some action.
        /// Dates are sent as `YYYY-MM-DD`.
        #[derive(Clone, PartialEq, Default, serde::Deserialize, serde::Serialize, Debug)]
        #[serde(rename_all = "camelCase")]
        pub struct Condition {
            #[serde(skip_serializing_if = "Option::is_none")]
            pub age: Option<i32>,
            #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::http::date::option")]
            pub created_before: Option<Date>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub days_since_custom_time: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub days_since_noncurrent_time: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub is_live: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub matches_storage_class: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub matches_prefix: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub matches_suffix: Option<Vec<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub num_newer_versions: Option<i32>,
        }
    }
}

/// Logging-related properties of a bucket.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Logging {
    /// The destination bucket where the current bucket's logs should be placed.
    pub log_bucket: String,
    /// A prefix for log object names.
    pub log_object_prefix: String,
}

/// Retention policy properties of a bucket.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPolicy {
    /// Server-determined value that indicates the time from which policy was
    /// enforced and effective.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub effective_time: Option<OffsetDateTime>,
    /// Once locked, an object retention policy cannot be modified.
    pub is_locked: Option<bool>,
    /// The duration in seconds that objects need to be retained.
    #[serde(deserialize_with = "google_cloud_gax::http::from_str")]
    pub retention_period: u64,
}

/// Properties of a bucket related to versioning.
/// For more on GCS versioning, see <https://cloud.google.com/storage/docs/object-versioning>.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Versioning {
    /// While set to true, versioning is fully enabled for this bucket.
    pub enabled: bool,
}

/// Properties of a bucket related to accessing the contents as a static website.
/// For more on hosting a static website via GCS, see
/// <https://cloud.google.com/storage/docs/hosting-static-website>.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    /// Suffix appended to a directory path, e.g. `index.html`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_page_suffix: Option<String>,
    /// Object served with a 404 when neither the path nor its main page exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_found_page: Option<String>,
}

/// An Identity and Access Management (IAM) policy, which specifies access
/// controls for a bucket.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Associates a list of `members` to a `role`.
    #[serde(default)]
    pub bindings: Vec<Binding>,
    /// `etag` is used for optimistic concurrency control.
    #[serde(default)]
    pub etag: String,
    /// Specifies the format of the policy. Policies with conditional role
    /// bindings must specify version 3.
    #[serde(default)]
    pub version: i32,
}

/// Associates `members` with a `role`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// Role that is assigned to `members`, e.g. `roles/storage.objectViewer`.
    pub role: String,
    /// Identities requesting access, e.g. `user:{email}`, `allUsers`.
    #[serde(default)]
    pub members: Vec<String>,
    /// The condition that is associated with this binding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

/// A CEL expression attached to a conditional binding.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub expression: String,
}
