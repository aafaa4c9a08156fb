use std::collections::HashMap;

use crate::http::table::TableReference;
use crate::http::types::EncryptionConfiguration;

pub mod delete;
pub mod get;
pub mod insert;
pub mod list;
pub mod patch;

#[derive(Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReference {
    /// Required. A unique ID for this dataset, without the project name.
    /// The ID must contain only letters (a-z, A-Z), numbers (0-9), or underscores (_).
    /// The maximum length is 1,024 characters.
    pub dataset_id: String,
    /// The ID of the project containing this dataset.
    pub project_id: String,
}

impl DatasetReference {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
        }
    }

    /// Reference to a table of this dataset.
    pub fn table(&self, table_id: impl Into<String>) -> TableReference {
        TableReference::new(self.project_id.as_str(), self.dataset_id.as_str(), table_id)
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum SpecialGroup {
    ProjectOwners,
    ProjectReaders,
    ProjectWriters,
    AllAuthenticatedUsers,
}

/// One grant of the dataset ACL. Exactly one grantee field is expected to be set.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    /// `READER`, `WRITER` or `OWNER`. Left empty for authorized views.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_by_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by_email: Option<String>,
    /// A domain to grant access to. Any users signed in with the domain specified will be granted the specified access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_group: Option<SpecialGroup>,
    /// Some other type of member that appears in the IAM Policy but isn't a user, group, domain, or special group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam_member: Option<String>,
    /// A view from a different dataset to grant access to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<TableReference>,
}

impl Access {
    pub fn user(role: &str, email: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            user_by_email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn group(role: &str, email: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            group_by_email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn special(role: &str, group: SpecialGroup) -> Self {
        Self {
            role: role.to_string(),
            special_group: Some(group),
            ..Default::default()
        }
    }

    pub fn authorized_view(view: TableReference) -> Self {
        Self {
            view: Some(view),
            ..Default::default()
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Output only. A hash of the resource. Sent back as `If-Match` on patch.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    pub dataset_reference: DatasetReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The default lifetime of all tables in the dataset, in milliseconds. The minimum lifetime value is 3600000 milliseconds (one hour).
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_table_expiration_ms: Option<i64>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_partition_expiration_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    /// An array of objects that define dataset access for one or more entities.
    /// When absent on creation the service grants the project roles and the creator `OWNER`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access: Vec<Access>,
    /// Output only. Milliseconds since the epoch.
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing)]
    pub creation_time: Option<i64>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing)]
    pub last_modified_time: Option<i64>,
    /// The geographic location where the dataset should reside. Immutable after creation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_encryption_configuration: Option<EncryptionConfiguration>,
}
