//! The resumable media upload protocol shared by Storage and BigQuery.
//!
//! <https://cloud.google.com/storage/docs/performing-resumable-uploads>
use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE, RANGE};
use reqwest::{Body, Response};
use reqwest_middleware::ClientWithMiddleware as Client;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::http::check_response_status;

/// Chunks of a multi-chunk upload must be a multiple of 256 KiB, except the last one.
pub const CHUNK_ALIGNMENT: usize = 256 * 1024;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ChunkError {
    #[error("invalid range: first={0} last={1}")]
    InvalidRange(u64, u64),
    #[error("total object size must not be zero")]
    ZeroTotalObjectSize,
    #[error("last byte must be less than total object size: last={0} total={1}")]
    InvalidLastBytes(u64, u64),
    #[error("invalid range header, received: {0}")]
    InvalidRangeHeader(String),
    #[error("server persisted nothing beyond offset {0}")]
    NoProgress(u64),
}

/// Rounds `size` down to a multiple of [`CHUNK_ALIGNMENT`], never below one alignment unit.
pub fn normalize_chunk_size(size: usize) -> usize {
    let aligned = size - size % CHUNK_ALIGNMENT;
    aligned.max(CHUNK_ALIGNMENT)
}

/// Byte range of a chunk, rendered as the `Content-Range` header value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkSize {
    range: Option<(u64, u64)>,
    total_object_size: Option<u64>,
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.range {
            Some((first, last)) => write!(f, "bytes {first}-{last}/")?,
            None => write!(f, "bytes */")?,
        }
        match self.total_object_size {
            Some(total_object_size) => write!(f, "{total_object_size}"),
            None => write!(f, "*"),
        }
    }
}

impl ChunkSize {
    /// Inclusive range `first_byte..=last_byte`. `None` total means the size is not known yet.
    pub fn new(first_byte: u64, last_byte: u64, total_object_size: Option<u64>) -> Result<ChunkSize, ChunkError> {
        if first_byte > last_byte {
            return Err(ChunkError::InvalidRange(first_byte, last_byte));
        }
        if let Some(total) = total_object_size {
            if total == 0 {
                return Err(ChunkError::ZeroTotalObjectSize);
            }
            if last_byte >= total {
                return Err(ChunkError::InvalidLastBytes(last_byte, total));
            }
        }
        Ok(Self {
            range: Some((first_byte, last_byte)),
            total_object_size,
        })
    }

    /// A chunk without data, used to query the status or to finish an upload of `total` bytes.
    pub fn empty(total_object_size: Option<u64>) -> ChunkSize {
        Self {
            range: None,
            total_object_size,
        }
    }

    pub fn size(&self) -> u64 {
        match self.range {
            Some((first, last)) => last - first + 1,
            None => 0,
        }
    }
}

/// Bytes persisted by the server so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadedRange {
    pub first_byte: u64,
    pub last_byte: u64,
}

impl UploadedRange {
    /// Offset of the next byte to send.
    pub fn next_offset(&self) -> u64 {
        self.last_byte + 1
    }
}

/// Parses a `Range: bytes=0-42` header of a `308 Resume Incomplete` response.
pub fn parse_range_header(value: &str) -> Result<UploadedRange, ChunkError> {
    let invalid = || ChunkError::InvalidRangeHeader(value.to_string());
    let range = value.strip_prefix("bytes=").ok_or_else(invalid)?;
    let (first, last) = range.split_once('-').ok_or_else(invalid)?;
    let first_byte = first.trim().parse().map_err(|_| invalid())?;
    let last_byte = last.trim().parse().map_err(|_| invalid())?;
    if first_byte > last_byte {
        return Err(invalid());
    }
    Ok(UploadedRange { first_byte, last_byte })
}

/// Reads the `Range` header of an incomplete upload. `None` means nothing was persisted yet.
pub fn uploaded_range(response: &Response) -> Result<Option<UploadedRange>, ChunkError> {
    match response.headers().get(RANGE) {
        None => Ok(None),
        Some(value) => {
            let value = value
                .to_str()
                .map_err(|_| ChunkError::InvalidRangeHeader(format!("{value:?}")))?;
            parse_range_header(value).map(Some)
        }
    }
}

#[derive(PartialEq, Debug)]
pub enum UploadStatus<T> {
    /// Every byte arrived and the resource was created.
    Ok(T),
    /// The session exists but no byte was persisted yet.
    NotStarted,
    ResumeIncomplete(UploadedRange),
}

/// A resumable upload session whose final response decodes into `T`.
pub struct ResumableUploadClient<T> {
    session_url: String,
    http: Client,
    _resource: PhantomData<fn() -> T>,
}

impl<T> Clone for ResumableUploadClient<T> {
    fn clone(&self) -> Self {
        Self {
            session_url: self.session_url.clone(),
            http: self.http.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResumableUploadClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ResumableUploadClient")
            .field("session_url", &self.session_url)
            .finish()
    }
}

impl<T: DeserializeOwned> ResumableUploadClient<T> {
    pub fn new(session_url: String, http: Client) -> Self {
        Self {
            session_url,
            http,
            _resource: PhantomData,
        }
    }

    pub fn url(&self) -> &str {
        self.session_url.as_str()
    }

    /// <https://cloud.google.com/storage/docs/performing-resumable-uploads#single-chunk-upload>
    pub async fn upload_single_chunk<B: Into<Body>>(&self, data: B, size: usize) -> Result<T, Error> {
        let response = self
            .http
            .put(&self.session_url)
            .header(CONTENT_LENGTH, size)
            .body(data)
            .send()
            .await?;
        let response = check_response_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// <https://cloud.google.com/storage/docs/performing-resumable-uploads#chunked-upload>
    pub async fn upload_multiple_chunk<B: Into<Body>>(
        &self,
        data: B,
        size: &ChunkSize,
    ) -> Result<UploadStatus<T>, Error> {
        let response = self
            .http
            .put(&self.session_url)
            .header(CONTENT_RANGE, size.to_string())
            .header(CONTENT_LENGTH, size.size())
            .body(data)
            .send()
            .await?;
        Self::map_resume_response(response).await
    }

    /// Asks how many bytes the session holds.
    /// <https://cloud.google.com/storage/docs/performing-resumable-uploads#status-check>
    pub async fn status(&self, total: Option<u64>) -> Result<UploadStatus<T>, Error> {
        self.upload_multiple_chunk("", &ChunkSize::empty(total)).await
    }

    /// Abandons the session. The server answers 499 on success.
    pub async fn cancel(self) -> Result<(), Error> {
        let response = self
            .http
            .delete(&self.session_url)
            .header(CONTENT_LENGTH, 0)
            .send()
            .await?;
        if response.status() != 499 {
            check_response_status(response).await?;
        }
        Ok(())
    }

    /// Uploads `data` in chunks of `chunk_size` rounded down to a multiple of
    /// [`CHUNK_ALIGNMENT`]. Each chunk starts where the server says the previous one ended.
    /// Fails with [`ChunkError::NoProgress`] when a chunk leaves the persisted offset where it was.
    pub async fn upload_all(&self, data: impl Into<Bytes>, chunk_size: usize) -> Result<T, Error> {
        let data = data.into();
        if data.is_empty() {
            return self.upload_single_chunk(data, 0).await;
        }
        let chunk_size = normalize_chunk_size(chunk_size) as u64;
        let total = data.len() as u64;
        let mut offset = 0;
        loop {
            let end = (offset + chunk_size).min(total);
            let range = ChunkSize::new(offset, end - 1, Some(total))?;
            let body = data.slice(offset as usize..end as usize);
            tracing::trace!("uploading {}", range);
            let next = match self.upload_multiple_chunk(body, &range).await? {
                UploadStatus::Ok(resource) => return Ok(resource),
                UploadStatus::NotStarted => 0,
                UploadStatus::ResumeIncomplete(persisted) => persisted.next_offset(),
            };
            if next <= offset {
                return Err(ChunkError::NoProgress(offset).into());
            }
            if next >= total {
                return Err(ChunkError::InvalidLastBytes(next - 1, total).into());
            }
            offset = next;
        }
    }

    async fn map_resume_response(response: Response) -> Result<UploadStatus<T>, Error> {
        if response.status() == 308 {
            Ok(match uploaded_range(&response)? {
                Some(range) => UploadStatus::ResumeIncomplete(range),
                None => UploadStatus::NotStarted,
            })
        } else {
            let response = check_response_status(response).await?;
            Ok(UploadStatus::Ok(response.json::<T>().await?))
        }
    }
}

#[cfg(test)]
mod test {
    use bytes::Bytes;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::error::Error;
    use crate::upload::{
        normalize_chunk_size, parse_range_header, ChunkError, ChunkSize, ResumableUploadClient, UploadStatus,
        UploadedRange, CHUNK_ALIGNMENT,
    };

    #[derive(serde::Deserialize, PartialEq, Debug)]
    struct Resource {
        name: String,
    }

    fn session(server: &MockServer) -> ResumableUploadClient<Resource> {
        let http = reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build();
        ResumableUploadClient::new(format!("{}/upload/session/1", server.uri()), http)
    }

    #[test]
    fn test_normalize_chunk_size() {
        let kib = 1024;
        assert_eq!(normalize_chunk_size(0), 256 * kib);
        assert_eq!(normalize_chunk_size(100 * kib), 256 * kib);
        assert_eq!(normalize_chunk_size(256 * kib), 256 * kib);
        assert_eq!(normalize_chunk_size(700 * kib), 512 * kib);
        assert_eq!(normalize_chunk_size(8 * 1024 * kib + 1), 8 * 1024 * kib);
    }

    #[test]
    fn test_content_range() {
        let chunk = ChunkSize::new(0, 262143, Some(1000000)).unwrap();
        assert_eq!(chunk.to_string(), "bytes 0-262143/1000000");
        assert_eq!(chunk.size(), 262144);

        let chunk = ChunkSize::new(262144, 524287, None).unwrap();
        assert_eq!(chunk.to_string(), "bytes 262144-524287/*");

        let chunk = ChunkSize::new(5, 5, Some(6)).unwrap();
        assert_eq!(chunk.size(), 1);

        assert_eq!(ChunkSize::empty(Some(10)).to_string(), "bytes */10");
        assert_eq!(ChunkSize::empty(None).to_string(), "bytes */*");
        assert_eq!(ChunkSize::empty(None).size(), 0);
    }

    #[test]
    fn test_invalid_chunk() {
        assert_eq!(ChunkSize::new(10, 9, None), Err(ChunkError::InvalidRange(10, 9)));
        assert_eq!(ChunkSize::new(0, 0, Some(0)), Err(ChunkError::ZeroTotalObjectSize));
        assert_eq!(ChunkSize::new(0, 10, Some(10)), Err(ChunkError::InvalidLastBytes(10, 10)));
    }

    #[test]
    fn test_parse_range_header() {
        assert_eq!(
            parse_range_header("bytes=0-262143").unwrap(),
            UploadedRange {
                first_byte: 0,
                last_byte: 262143
            }
        );
        assert_eq!(parse_range_header("bytes=0-99").unwrap().next_offset(), 100);
        assert!(parse_range_header("0-99").is_err());
        assert!(parse_range_header("bytes=abc-1").is_err());
        assert!(parse_range_header("bytes=9-1").is_err());
    }

    #[tokio::test]
    async fn test_cancel() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/upload/session/1"))
            .respond_with(ResponseTemplate::new(499))
            .expect(1)
            .mount(&server)
            .await;
        session(&server).cancel().await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/upload/session/1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"code": 404, "message": "No such upload session"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let err = session(&server).cancel().await.unwrap_err();
        assert_eq!(err.http_status(), Some(404));
    }

    #[tokio::test]
    async fn test_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/upload/session/1"))
            .and(header("Content-Range", "bytes */1000000"))
            .respond_with(ResponseTemplate::new(308).insert_header("Range", "bytes=0-262143"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/upload/session/1"))
            .and(header("Content-Range", "bytes */*"))
            .respond_with(ResponseTemplate::new(308))
            .expect(1)
            .mount(&server)
            .await;

        let client = session(&server);
        assert_eq!(
            client.status(Some(1000000)).await.unwrap(),
            UploadStatus::ResumeIncomplete(UploadedRange {
                first_byte: 0,
                last_byte: 262143
            })
        );
        assert_eq!(client.status(None).await.unwrap(), UploadStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_status_completed() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/upload/session/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "done"})))
            .mount(&server)
            .await;
        assert_eq!(
            session(&server).status(Some(10)).await.unwrap(),
            UploadStatus::Ok(Resource {
                name: "done".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_upload_all_without_progress() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/upload/session/1"))
            .respond_with(ResponseTemplate::new(308))
            .mount(&server)
            .await;

        let data = Bytes::from(vec![0u8; CHUNK_ALIGNMENT + 10]);
        let result = session(&server).upload_all(data, CHUNK_ALIGNMENT).await;
        assert!(matches!(result, Err(Error::Chunk(ChunkError::NoProgress(0)))));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_all_stalled_after_first_chunk() {
        let server = MockServer::start().await;
        let persisted = format!("bytes=0-{}", CHUNK_ALIGNMENT - 1);
        Mock::given(method("PUT"))
            .and(path("/upload/session/1"))
            .respond_with(ResponseTemplate::new(308).insert_header("Range", persisted.as_str()))
            .mount(&server)
            .await;

        let data = vec![0u8; 3 * CHUNK_ALIGNMENT];
        let result = session(&server).upload_all(data, CHUNK_ALIGNMENT).await;
        match result {
            Err(Error::Chunk(ChunkError::NoProgress(offset))) => assert_eq!(offset, CHUNK_ALIGNMENT as u64),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }
}
