use std::collections::HashMap;
use std::str::FromStr;

use google_cloud_gax::error::Error;

pub mod delete;
pub mod get;
pub mod insert;
pub mod list;

/// A subscription to receive Google PubSub notifications.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// The ID of the notification.
    #[serde(default)]
    pub id: String,
    /// The Cloud PubSub topic to which this subscription publishes. Formatted as:
    /// `//pubsub.googleapis.com/projects/{project-id}/topics/{my-topic}`
    pub topic: String,
    /// If present, only send notifications about listed event types. If empty,
    /// sent notifications for all event types.
    pub event_types: Option<Vec<EventType>>,
    /// An optional list of additional attributes to attach to each Cloud PubSub
    /// message published for this notification subscription.
    pub custom_attributes: Option<HashMap<String, String>>,
    /// HTTP 1.1 Entity tag for this subscription notification.
    #[serde(default)]
    pub etag: String,
    /// If present, only apply this notification configuration to object names that
    /// begin with this prefix.
    pub object_name_prefix: Option<String>,
    /// The desired content of the Payload.
    #[serde(default)]
    pub payload_format: PayloadFormat,
    /// The canonical URL of this notification.
    #[serde(default)]
    pub self_link: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Sent when a new object (or a new generation of an existing object)
    /// is successfully created in the bucket.
    ObjectFinalize,
    /// Sent when the metadata of an existing object changes.
    ObjectMetadataUpdate,
    /// Sent when an object has been permanently deleted.
    ObjectDelete,
    /// Only sent when a bucket has enabled object versioning.
    ObjectArchive,
}

/// Accepts the API names as well as the short aliases `finalize`, `create`,
/// `update`, `metadata_update`, `delete` and `archive`, case-insensitively.
impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "object_finalize" | "finalize" | "create" => Ok(EventType::ObjectFinalize),
            "object_metadata_update" | "object_update" | "metadata_update" | "update" => {
                Ok(EventType::ObjectMetadataUpdate)
            }
            "object_delete" | "delete" => Ok(EventType::ObjectDelete),
            "object_archive" | "archive" => Ok(EventType::ObjectArchive),
            _ => Err(Error::InvalidArgument(format!("unknown event type: {s}"))),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadFormat {
    /// The object resource is serialized as JSON in the message payload.
    #[default]
    JsonApiV1,
    /// No payload is included with the notification.
    None,
}

/// Accepts `json_api_v1`, `json`, `true`, `none` and `false`, case-insensitively.
impl FromStr for PayloadFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json_api_v1" | "json" | "true" => Ok(PayloadFormat::JsonApiV1),
            "none" | "false" => Ok(PayloadFormat::None),
            _ => Err(Error::InvalidArgument(format!("unknown payload format: {s}"))),
        }
    }
}

impl From<bool> for PayloadFormat {
    fn from(value: bool) -> Self {
        if value {
            PayloadFormat::JsonApiV1
        } else {
            PayloadFormat::None
        }
    }
}

/// Expands a bare topic name to `//pubsub.googleapis.com/projects/{project}/topics/{topic}`.
/// Names that already contain a `/` are returned untouched.
pub fn topic_path(project: &str, topic: &str) -> String {
    if topic.contains('/') {
        topic.to_string()
    } else {
        format!("//pubsub.googleapis.com/projects/{project}/topics/{topic}")
    }
}
