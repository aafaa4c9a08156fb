pub use google_cloud_gax::upload::{ChunkError, ChunkSize, UploadedRange, CHUNK_ALIGNMENT};

use crate::http::job::Job;

/// The data of a load job sent through a resumable session, created by
/// [`prepare_resumable_upload`](crate::http::bigquery_job_client::BigqueryJobClient::prepare_resumable_upload).
pub type ResumableUploadClient = google_cloud_gax::upload::ResumableUploadClient<Job>;

pub type UploadStatus = google_cloud_gax::upload::UploadStatus<Job>;

#[cfg(test)]
mod test {
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::resumable_upload_client::{
        ChunkError, ResumableUploadClient, UploadStatus, UploadedRange, CHUNK_ALIGNMENT,
    };
    use crate::http::Error;

    fn session(server: &MockServer) -> ResumableUploadClient {
        let http = reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build();
        ResumableUploadClient::new(format!("{}/upload/bigquery/v2/projects/p/jobs?upload_id=u1", server.uri()), http)
    }

    #[tokio::test]
    #[serial]
    async fn test_cancel() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/upload/bigquery/v2/projects/p/jobs"))
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
            .respond_with(ResponseTemplate::new(410).set_body_json(json!({
                "error": {"code": 410, "message": "upload session expired"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let err = session(&server).cancel().await.unwrap_err();
        assert_eq!(err.http_status(), Some(410));
    }

    #[tokio::test]
    #[serial]
    async fn test_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/upload/bigquery/v2/projects/p/jobs"))
            .and(header("Content-Range", "bytes */*"))
            .respond_with(ResponseTemplate::new(308).insert_header("Range", "bytes=0-524287"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/upload/bigquery/v2/projects/p/jobs"))
            .and(header("Content-Range", "bytes */*"))
            .respond_with(ResponseTemplate::new(308))
            .mount(&server)
            .await;

        let client = session(&server);
        match client.status(None).await.unwrap() {
            UploadStatus::ResumeIncomplete(range) => {
                assert_eq!(
                    range,
                    UploadedRange {
                        first_byte: 0,
                        last_byte: 524287
                    }
                );
                assert_eq!(range.next_offset(), 524288);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(client.status(None).await.unwrap(), UploadStatus::NotStarted));
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_all_stops_without_progress() {
        let server = MockServer::start().await;
        let persisted = format!("bytes=0-{}", CHUNK_ALIGNMENT - 1);
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(308).insert_header("Range", persisted.as_str()))
            .mount(&server)
            .await;
        let result = session(&server)
            .upload_all(vec![1u8; 3 * CHUNK_ALIGNMENT], CHUNK_ALIGNMENT)
            .await;
        assert!(matches!(result, Err(Error::Chunk(ChunkError::NoProgress(_)))));
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }
}
