use crate::http::object_access_controls::ProjectTeam;

pub mod delete;
pub mod insert;
pub mod list;

/// Predefined or "canned" aliases for sets of specific bucket ACL entries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum PredefinedBucketAcl {
    /// Project team owners get `OWNER` access, and
    /// `allAuthenticatedUsers` get `READER` access.
    AuthenticatedRead,
    /// Project team owners get `OWNER` access.
    Private,
    /// Project team members get access according to their roles.
    ProjectPrivate,
    /// Project team owners get `OWNER` access, and
    /// `allUsers` get `READER` access.
    PublicRead,
    /// Project team owners get `OWNER` access, and
    /// `allUsers` get `WRITER` access.
    PublicReadWrite,
}

/// An access-control entry on a bucket.
#[derive(Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BucketAccessControl {
    /// The access permission for the entity.
    pub role: BucketACLRole,
    /// The ID of the access-control entry.
    #[serde(default)]
    pub id: String,
    /// The entity holding the permission.
    pub entity: String,
    /// The ID for the entity, if any.
    pub entity_id: Option<String>,
    /// The email address associated with the entity, if any.
    pub email: Option<String>,
    /// The domain associated with the entity, if any.
    pub domain: Option<String>,
    /// The project team associated with the entity, if any.
    pub project_team: Option<ProjectTeam>,
    #[serde(default)]
    pub self_link: String,
    #[serde(default)]
    pub etag: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize, Debug, Default)]
pub enum BucketACLRole {
    OWNER,
    #[default]
    READER,
    WRITER,
}
