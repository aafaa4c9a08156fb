pub mod delete;
pub mod insert;
pub mod list;

/// An access-control entry on an object.
#[derive(Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAccessControl {
    /// The name of the bucket.
    pub bucket: Option<String>,
    /// The domain associated with the entity, if any.
    pub domain: Option<String>,
    /// The email address associated with the entity, if any.
    pub email: Option<String>,
    /// The entity holding the permission, in one of the following forms:
    /// `user-{userid}`, `user-{email}`, `group-{groupid}`, `group-{email}`,
    /// `domain-{domain}`, `project-{team-projectid}`, `allUsers`, `allAuthenticatedUsers`.
    pub entity: String,
    /// The ID for the entity, if any.
    pub entity_id: Option<String>,
    /// HTTP 1.1 Entity tag for the access-control entry.
    #[serde(default)]
    pub etag: String,
    /// The content generation of the object, if applied to an object.
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub generation: Option<i64>,
    /// The ID of the access-control entry.
    pub id: Option<String>,
    /// The name of the object, if applied to an object.
    pub object: Option<String>,
    /// The project team associated with the entity, if any.
    pub project_team: Option<ProjectTeam>,
    /// The access permission for the entity.
    pub role: ObjectACLRole,
    /// The link to this access-control entry.
    pub self_link: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize, Debug, Default)]
pub enum ObjectACLRole {
    #[default]
    READER,
    OWNER,
}

/// Predefined or "canned" aliases for sets of specific object ACL entries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum PredefinedObjectAcl {
    /// Object owner gets `OWNER` access, and `allAuthenticatedUsers` get `READER` access.
    AuthenticatedRead,
    /// Object owner gets `OWNER` access, and project team owners get `OWNER` access.
    BucketOwnerFullControl,
    /// Object owner gets `OWNER` access, and project team owners get `READER` access.
    BucketOwnerRead,
    /// Object owner gets `OWNER` access.
    Private,
    /// Object owner gets `OWNER` access, and project team members get access according to their roles.
    ProjectPrivate,
    /// Object owner gets `OWNER` access, and `allUsers` get `READER` access.
    PublicRead,
}

/// Represents the Viewers, Editors, or Owners of a given project.
#[derive(Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTeam {
    /// The project number.
    #[serde(default)]
    pub project_number: String,
    /// The team. One of `owners`, `editors` or `viewers`.
    #[serde(default)]
    pub team: String,
}

/// Set of properties to return in a response.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub enum Projection {
    /// Omit `owner`, `acl` and `defaultObjectAcl` properties.
    NoAcl,
    /// Include all properties.
    Full,
}
