pub use google_cloud_gax::upload::{ChunkError, ChunkSize, UploadedRange, CHUNK_ALIGNMENT};

use crate::http::objects::Object;

/// An upload session created by
/// [`prepare_resumable_upload`](crate::http::storage_client::StorageClient::prepare_resumable_upload).
pub type ResumableUploadClient = google_cloud_gax::upload::ResumableUploadClient<Object>;

pub type UploadStatus = google_cloud_gax::upload::UploadStatus<Object>;

#[cfg(test)]
mod test {
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::resumable_upload_client::{
        ChunkError, ChunkSize, ResumableUploadClient, UploadStatus, UploadedRange, CHUNK_ALIGNMENT,
    };
    use crate::http::Error;

    fn session(server: &MockServer) -> ResumableUploadClient {
        let http = reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build();
        ResumableUploadClient::new(format!("{}/upload/storage/v1/b/b/o?upload_id=u1", server.uri()), http)
    }

    #[tokio::test]
    #[serial]
    async fn test_cancel() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/upload/storage/v1/b/b/o"))
            .respond_with(ResponseTemplate::new(499))
            .expect(1)
            .mount(&server)
            .await;
        session(&server).cancel().await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_cancel_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"code": 500, "message": "backend error"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let err = session(&server).cancel().await.unwrap_err();
        assert_eq!(err.http_status(), Some(500));
    }

    #[tokio::test]
    #[serial]
    async fn test_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/upload/storage/v1/b/b/o"))
            .and(header("Content-Range", "bytes */524288"))
            .respond_with(ResponseTemplate::new(308).insert_header("Range", "bytes=0-262143"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/upload/storage/v1/b/b/o"))
            .and(header("Content-Range", "bytes */524288"))
            .respond_with(ResponseTemplate::new(308))
            .mount(&server)
            .await;

        let client = session(&server);
        let status = client.status(Some(524288)).await.unwrap();
        assert_eq!(
            status,
            UploadStatus::ResumeIncomplete(UploadedRange {
                first_byte: 0,
                last_byte: 262143
            })
        );
        assert_eq!(client.status(Some(524288)).await.unwrap(), UploadStatus::NotStarted);
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_multiple_chunk_finished() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(header("Content-Range", "bytes 0-4/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bucket": "b",
                "name": "o",
                "size": "5"
            })))
            .mount(&server)
            .await;
        let chunk = ChunkSize::new(0, 4, Some(5)).unwrap();
        match session(&server).upload_multiple_chunk("hello", &chunk).await.unwrap() {
            UploadStatus::Ok(object) => assert_eq!(object.size, 5),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_all_stops_without_progress() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(308))
            .mount(&server)
            .await;
        let result = session(&server).upload_all(vec![1u8; 2 * CHUNK_ALIGNMENT], CHUNK_ALIGNMENT).await;
        assert!(matches!(result, Err(Error::Chunk(ChunkError::NoProgress(0)))));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
