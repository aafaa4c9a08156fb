use std::borrow::Cow;

use bytes::{BufMut, Bytes, BytesMut};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Body;
use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};
use time::OffsetDateTime;

use google_cloud_gax::error::Error;

use crate::http::object_access_controls::{PredefinedObjectAcl, Projection};
use crate::http::objects::{content_type_for, Encryption, Object};
use crate::http::Escape;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Name and type of the data of a media upload.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Media {
    pub name: Cow<'static, str>,
    pub content_type: Cow<'static, str>,
    pub content_length: Option<u64>,
}

impl Media {
    /// The content type is inferred from the extension of `name`,
    /// falling back to `application/octet-stream`.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name).unwrap_or(DEFAULT_CONTENT_TYPE);
        Self {
            name,
            content_type: Cow::Borrowed(content_type),
            content_length: None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum UploadType {
    /// Data only, see <https://cloud.google.com/storage/docs/uploading-objects#uploading-an-object>.
    Simple(Media),
    /// Data together with object metadata in one `multipart/related` request.
    Multipart(Box<Object>),
}

/// Request message for InsertObject.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadObjectRequest {
    /// Name of the bucket in which to store the new object.
    #[serde(skip_serializing)]
    pub bucket: String,
    /// Makes the operation conditional on whether the object's current generation
    /// matches the given value. Setting to 0 makes the operation succeed only if
    /// there are no live versions of the object.
    pub if_generation_match: Option<i64>,
    /// Makes the operation conditional on whether the object's current generation
    /// does not match the given value.
    pub if_generation_not_match: Option<i64>,
    /// Makes the operation conditional on whether the object's current
    /// metageneration matches the given value.
    pub if_metageneration_match: Option<i64>,
    /// Makes the operation conditional on whether the object's current
    /// metageneration does not match the given value.
    pub if_metageneration_not_match: Option<i64>,
    /// Resource name of the Cloud KMS key that will be used to encrypt the object.
    pub kms_key_name: Option<String>,
    /// Apply a predefined set of access controls to this object.
    pub predefined_acl: Option<PredefinedObjectAcl>,
    /// Set of properties to return. Defaults to `NO_ACL`.
    pub projection: Option<Projection>,
    /// Customer-supplied key to encrypt the data with.
    #[serde(skip_serializing)]
    pub encryption: Option<Encryption>,
    /// The project to be billed for a requester pays bucket.
    pub user_project: Option<String>,
}

impl UploadObjectRequest {
    fn with_encryption(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.encryption {
            Some(e) => e.with_headers(builder),
            None => builder,
        }
    }
}

pub(crate) fn build<T: Into<Body>>(
    base_url: &str,
    client: &Client,
    req: &UploadObjectRequest,
    media: &Media,
    body: T,
) -> RequestBuilder {
    let url = format!("{}/b/{}/o", base_url, req.bucket.escape());
    let mut builder = client
        .post(url)
        .query(&req)
        .query(&[("uploadType", "media"), ("name", media.name.as_ref())])
        .header(CONTENT_TYPE, media.content_type.to_string());
    if let Some(len) = media.content_length {
        builder = builder.header(CONTENT_LENGTH, len);
    }
    req.with_encryption(builder).body(body)
}

pub(crate) fn build_multipart(
    base_url: &str,
    client: &Client,
    req: &UploadObjectRequest,
    metadata: &Object,
    data: Bytes,
) -> Result<RequestBuilder, Error> {
    let url = format!("{}/b/{}/o", base_url, req.bucket.escape());
    let boundary = format!("gcloud_rest_storage_{}", OffsetDateTime::now_utc().unix_timestamp_nanos());
    let data_type = metadata
        .content_type
        .as_deref()
        .or_else(|| content_type_for(&metadata.name))
        .unwrap_or(DEFAULT_CONTENT_TYPE);
    let body = multipart_related(&boundary, &serde_json::to_vec(metadata)?, data_type, &data);
    let builder = client
        .post(url)
        .query(&req)
        .query(&[("uploadType", "multipart")])
        .header(CONTENT_TYPE, format!("multipart/related; boundary={boundary}"))
        .header(CONTENT_LENGTH, body.len());
    Ok(req.with_encryption(builder).body(body))
}

fn multipart_related(boundary: &str, metadata: &[u8], data_type: &str, data: &[u8]) -> Bytes {
    let mut body = BytesMut::with_capacity(metadata.len() + data.len() + 256);
    body.put_slice(format!("--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n").as_bytes());
    body.put_slice(metadata);
    body.put_slice(format!("\r\n--{boundary}\r\nContent-Type: {data_type}\r\n\r\n").as_bytes());
    body.put_slice(data);
    body.put_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body.freeze()
}

/// Starts a resumable session. The `Location` header of the response is the session URL.
pub(crate) fn build_resumable_session_simple(
    base_url: &str,
    client: &Client,
    req: &UploadObjectRequest,
    media: &Media,
) -> RequestBuilder {
    let url = format!("{}/b/{}/o", base_url, req.bucket.escape());
    let mut builder = client
        .post(url)
        .query(&req)
        .query(&[("uploadType", "resumable"), ("name", media.name.as_ref())])
        .header("X-Upload-Content-Type", media.content_type.to_string())
        .header(CONTENT_LENGTH, 0);
    if let Some(len) = media.content_length {
        builder = builder.header("X-Upload-Content-Length", len);
    }
    req.with_encryption(builder)
}

pub(crate) fn build_resumable_session_metadata(
    base_url: &str,
    client: &Client,
    req: &UploadObjectRequest,
    metadata: &Object,
) -> RequestBuilder {
    let url = format!("{}/b/{}/o", base_url, req.bucket.escape());
    let mut builder = client
        .post(url)
        .query(&req)
        .query(&[("uploadType", "resumable")])
        .json(metadata);
    if let Some(content_type) = metadata.content_type.as_deref().or_else(|| content_type_for(&metadata.name)) {
        builder = builder.header("X-Upload-Content-Type", content_type);
    }
    req.with_encryption(builder)
}

#[cfg(test)]
mod test {
    use crate::http::objects::upload::{multipart_related, Media};

    #[test]
    fn test_media_content_type() {
        assert_eq!(Media::new("data/rows.json").content_type, "application/json");
        assert_eq!(Media::new("blob").content_type, "application/octet-stream");
        assert_eq!(Media::new("exports/rows.tsv").content_type, "text/tab-separated-values");
        assert_eq!(Media::new("clip.webm").content_type, "video/webm");
    }

    #[test]
    fn test_multipart_related() {
        let body = multipart_related("b1", br#"{"name":"a.txt"}"#, "text/plain", b"hello");
        let expected = "--b1\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{\"name\":\"a.txt\"}\r\n--b1\r\nContent-Type: text/plain\r\n\r\nhello\r\n--b1--\r\n";
        assert_eq!(body.as_ref(), expected.as_bytes());
    }
}
