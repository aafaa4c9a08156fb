use std::collections::HashMap;

use base64::prelude::*;
use reqwest_middleware::RequestBuilder;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use crate::http::object_access_controls::ObjectAccessControl;

pub mod copy;
pub mod delete;
pub mod download;
pub mod get;
pub mod list;
pub mod patch;
pub mod rewrite;
pub mod upload;

/// An object.
#[derive(Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct Object {
    /// The link to this object.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    /// The media link to this object.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub media_link: String,
    /// Content-Encoding of the object data, matching
    /// [RFC 7231 §3.1.2.2](https://tools.ietf.org/html/rfc7231#section-3.1.2.2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    /// Content-Disposition of the object data, matching
    /// [RFC 6266](https://tools.ietf.org/html/rfc6266).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_disposition: Option<String>,
    /// Cache-Control directive for the object data. If omitted, and the object is
    /// accessible to all anonymous users, the default will be `public, max-age=3600`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,
    /// Access controls on the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<Vec<ObjectAccessControl>>,
    /// Content-Language of the object data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_language: Option<String>,
    /// The version of the metadata for this object at this generation.
    #[serde(skip_serializing_if = "google_cloud_gax::http::is_i64_zero")]
    #[serde(deserialize_with = "google_cloud_gax::http::from_str")]
    pub metageneration: i64,
    /// The deletion time of the object. Will be returned if and only if this
    /// version of the object has been deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_deleted: Option<OffsetDateTime>,
    /// Content-Type of the object data. If an object is stored without a
    /// Content-Type, it is served as `application/octet-stream`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Content-Length of the object data in bytes.
    #[serde(skip_serializing_if = "google_cloud_gax::http::is_i64_zero")]
    #[serde(deserialize_with = "google_cloud_gax::http::from_str")]
    pub size: i64,
    /// The creation time of the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_created: Option<OffsetDateTime>,
    /// CRC32c checksum, as a base64 encoded big-endian integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crc32c: Option<String>,
    /// MD5 hash of the data, encoded using base64.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5_hash: Option<String>,
    /// HTTP 1.1 Entity tag for the object.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    /// The modification time of the object metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated: Option<OffsetDateTime>,
    /// Storage class of the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
    /// Cloud KMS Key used to encrypt this object, if the object is encrypted by
    /// such a key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_name: Option<String>,
    /// The time at which the object's storage class was last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub time_storage_class_updated: Option<OffsetDateTime>,
    /// Whether an object is under temporary hold. While this flag is set to true,
    /// the object is protected against deletion and overwrites.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_hold: Option<bool>,
    /// A server-determined value that specifies the earliest time that the
    /// object's retention period expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub retention_expiration_time: Option<OffsetDateTime>,
    /// User-provided metadata, in key/value pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    /// Whether an object is under event-based hold. After being released (set to
    /// false), such objects will be subject to bucket-level retention (if any).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_based_hold: Option<bool>,
    /// The name of the object.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// The ID of the object, including the bucket name, object name, and
    /// generation number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// The name of the bucket containing this object.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bucket: String,
    /// The content generation of this object. Used for object versioning.
    #[serde(skip_serializing_if = "google_cloud_gax::http::is_i64_zero")]
    #[serde(deserialize_with = "google_cloud_gax::http::from_str")]
    pub generation: i64,
    /// The owner of the object. This will always be the uploader of the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    /// Metadata of customer-supplied encryption key, if the object is encrypted by
    /// such a key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_encryption: Option<CustomerEncryption>,
    /// A user-specified timestamp set on an object.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub custom_time: Option<OffsetDateTime>,
}

/// Describes the customer-specified mechanism used to store the data at rest.
#[derive(Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEncryption {
    /// The encryption algorithm.
    pub encryption_algorithm: String,
    /// SHA256 hash value of the encryption key.
    pub key_sha256: String,
}

/// The owner of a specific resource.
#[derive(Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// The entity, in the form `user-`*userId*.
    #[serde(default)]
    pub entity: String,
    /// The ID for the entity.
    pub entity_id: Option<String>,
}

/// Customer-supplied encryption key sent with an object request.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Encryption {
    /// Encryption algorithm used with Customer-Supplied Encryption Keys feature.
    pub encryption_algorithm: String,
    /// Base64 encoded encryption key.
    pub encryption_key: String,
    /// Base64 encoded SHA256 hash of the encryption key.
    pub encryption_key_sha256: String,
}

impl Encryption {
    /// Builds the `AES256` headers for a raw 32 byte key.
    pub fn from_key(key: &[u8]) -> Self {
        Self {
            encryption_algorithm: "AES256".to_string(),
            encryption_key: BASE64_STANDARD.encode(key),
            encryption_key_sha256: BASE64_STANDARD.encode(Sha256::digest(key)),
        }
    }

    pub(crate) fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Goog-Encryption-Algorithm", &self.encryption_algorithm)
            .header("X-Goog-Encryption-Key", &self.encryption_key)
            .header("X-Goog-Encryption-Key-Sha256", &self.encryption_key_sha256)
    }

    /// Headers describing the key of the source object of a copy or rewrite.
    pub(crate) fn with_copy_source_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Goog-Copy-Source-Encryption-Algorithm", &self.encryption_algorithm)
            .header("X-Goog-Copy-Source-Encryption-Key", &self.encryption_key)
            .header("X-Goog-Copy-Source-Encryption-Key-Sha256", &self.encryption_key_sha256)
    }
}

/// Guesses the content type from the extension of an object name.
pub fn content_type_for(name: &str) -> Option<&'static str> {
    mime_guess::from_path(name).first_raw()
}

#[cfg(test)]
mod test {
    use crate::http::objects::{content_type_for, Encryption, Object};

    #[test]
    fn test_encryption_from_key() {
        let key = [7u8; 32];
        let e = Encryption::from_key(&key);
        assert_eq!(e.encryption_algorithm, "AES256");
        assert_eq!(e.encryption_key, "BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwc=");
        assert_eq!(e.encryption_key_sha256.len(), 44);
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("report.csv"), Some("text/csv"));
        assert_eq!(content_type_for("dir.v2/IMAGE.PNG"), Some("image/png"));
        assert_eq!(content_type_for("dir.v2/noext"), None);
        assert_eq!(content_type_for("archive.unknown"), None);
        assert_eq!(
            content_type_for("a.docx"),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        );
        assert_eq!(
            content_type_for("a.xlsx"),
            Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        );
        assert_eq!(content_type_for("a.tsv"), Some("text/tab-separated-values"));
        assert_eq!(content_type_for("videos/a.webm"), Some("video/webm"));
        assert!(content_type_for("fonts/a.woff2").is_some());
        assert!(content_type_for("a.tar.bz2").is_some());
    }

    #[test]
    fn test_deserialize_object() {
        let json = r#"{
            "kind": "storage#object",
            "id": "bucket/file.txt/1",
            "name": "file.txt",
            "bucket": "bucket",
            "generation": "1",
            "metageneration": "2",
            "size": "5",
            "md5Hash": "XUFAKrxLKna5cZ2REBfFkg==",
            "crc32c": "mnG7TA==",
            "timeCreated": "2024-01-02T03:04:05.678Z",
            "metadata": {"k": "v"}
        }"#;
        let object: Object = serde_json::from_str(json).unwrap();
        assert_eq!(object.generation, 1);
        assert_eq!(object.metageneration, 2);
        assert_eq!(object.size, 5);
        assert_eq!(object.metadata.unwrap()["k"], "v");
        assert!(object.time_created.is_some());
        assert!(object.updated.is_none());
    }
}
