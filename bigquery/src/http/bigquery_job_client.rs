use std::sync::Arc;

use futures_util::Stream;
use reqwest::header::LOCATION;

use google_cloud_gax::paging;
use google_cloud_gax::retry::invoke;

use crate::http::bigquery_client::BigqueryClient;
use crate::http::job;
use crate::http::job::cancel::{CancelJobRequest, CancelJobResponse};
use crate::http::job::delete::DeleteJobRequest;
use crate::http::job::get::GetJobRequest;
use crate::http::job::get_query_results::{GetQueryResultsRequest, GetQueryResultsResponse};
use crate::http::job::list::{JobOverview, ListJobsRequest, ListJobsResponse};
use crate::http::job::query::{QueryRequest, QueryResponse};
use crate::http::job::{generate_job_id, Job};
use crate::http::resumable_upload_client::ResumableUploadClient;
use crate::http::{CancellationToken, Error};

/// `job` with a generated id when it has none.
fn with_job_id(job: &Job) -> Job {
    let mut job = job.clone();
    if job.job_reference.job_id.is_empty() {
        job.job_reference.job_id = generate_job_id(None);
    }
    job
}

#[derive(Debug, Clone)]
pub struct BigqueryJobClient {
    inner: Arc<BigqueryClient>,
}

impl BigqueryJobClient {
    pub fn new(inner: Arc<BigqueryClient>) -> Self {
        Self { inner }
    }

    /// Starts a job. A job without id gets a generated one, so the insert is always retried.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create(&self, metadata: &Job, cancel: Option<CancellationToken>) -> Result<Job, Error> {
        let metadata = &with_job_id(metadata);
        let action = || async move {
            let builder = job::insert::build(self.inner.endpoint(), self.inner.http(), metadata);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(
        &self,
        project_id: &str,
        job_id: &str,
        req: &GetJobRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Job, Error> {
        let action = || async move {
            let builder = job::get::build(self.inner.endpoint(), self.inner.http(), project_id, job_id, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    /// Requests cancellation. The returned job may still be running.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn cancel(
        &self,
        project_id: &str,
        job_id: &str,
        req: &CancelJobRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<CancelJobResponse, Error> {
        let action = || async move {
            let builder = job::cancel::build(self.inner.endpoint(), self.inner.http(), project_id, job_id, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete(
        &self,
        project_id: &str,
        job_id: &str,
        req: &DeleteJobRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<(), Error> {
        let action = || async move {
            let builder = job::delete::build(self.inner.endpoint(), self.inner.http(), project_id, job_id, req);
            self.inner.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_page(
        &self,
        project_id: &str,
        req: &ListJobsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListJobsResponse, Error> {
        let action = || async move {
            let builder = job::list::build(self.inner.endpoint(), self.inner.http(), project_id, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list(&self, project_id: &str, req: &ListJobsRequest) -> Result<Vec<JobOverview>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| async move {
            let req = ListJobsRequest {
                page_token,
                ..req.clone()
            };
            self.list_page(project_id, &req, None).await
        })
        .await
    }

    pub fn list_stream<'a>(
        &'a self,
        project_id: &'a str,
        req: &'a ListJobsRequest,
    ) -> impl Stream<Item = Result<JobOverview, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListJobsRequest {
                page_token,
                ..req.clone()
            };
            self.list_page(project_id, &req, None).await
        })
    }

    /// Runs a query and waits up to `timeout_ms` for the first page. A missing `request_id`
    /// is generated so that the call can be retried.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn query(
        &self,
        project_id: &str,
        req: &QueryRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<QueryResponse, Error> {
        let mut req = req.clone();
        if req.request_id.is_none() {
            req.request_id = Some(generate_job_id(Some("request_")));
        }
        let req = &req;
        let action = || async move {
            let builder = job::query::build(self.inner.endpoint(), self.inner.http(), project_id, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_query_results(
        &self,
        project_id: &str,
        job_id: &str,
        req: &GetQueryResultsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<GetQueryResultsResponse, Error> {
        let action = || async move {
            let builder =
                job::get_query_results::build(self.inner.endpoint(), self.inner.http(), project_id, job_id, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    /// Opens a resumable upload session for a load job. The job starts once the data is complete.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn prepare_resumable_upload(
        &self,
        metadata: &Job,
        cancel: Option<CancellationToken>,
    ) -> Result<ResumableUploadClient, Error> {
        let metadata = &with_job_id(metadata);
        let action = || async move {
            let builder = job::upload::build_resumable_session(self.inner.upload_endpoint(), self.inner.http(), metadata);
            let response = self.inner.send_raw(builder).await?;
            match response.headers().get(LOCATION).map(|v| v.to_str()) {
                Some(Ok(url)) => Ok(url.to_string()),
                _ => Err(Error::UnexpectedResponse(
                    "resumable session response has no Location header".to_string(),
                )),
            }
        };
        let session_url = invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await?;
        Ok(ResumableUploadClient::new(session_url, self.inner.http().clone()))
    }

    /// Uploads `data` as the source of the load job `metadata` and returns the inserted job.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn upload(
        &self,
        metadata: &Job,
        data: impl Into<bytes::Bytes>,
        chunk_size: usize,
        cancel: Option<CancellationToken>,
    ) -> Result<Job, Error> {
        let uploader = self.prepare_resumable_upload(metadata, cancel).await?;
        uploader.upload_all(data, chunk_size).await
    }
}

#[cfg(test)]
mod test {
    use futures_util::StreamExt;
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use crate::http::bigquery_client::test::{mock_client, rate_limited};
    use crate::http::bigquery_job_client::BigqueryJobClient;
    use crate::http::job::cancel::CancelJobRequest;
    use crate::http::job::get::GetJobRequest;
    use crate::http::job::get_query_results::GetQueryResultsRequest;
    use crate::http::job::list::{ListJobsRequest, Projection, StateFilter};
    use crate::http::job::query::QueryRequest;
    use crate::http::job::{Job, JobConfiguration, JobConfigurationLoad, JobReference, JobState};
    use crate::http::resumable_upload_client::CHUNK_ALIGNMENT;
    use crate::http::table::{SourceFormat, TableReference};

    fn query_job() -> Job {
        Job {
            job_reference: JobReference {
                project_id: "p".to_string(),
                ..Default::default()
            },
            configuration: JobConfiguration {
                query: Some(Default::default()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_create_generates_id_and_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bigquery/v2/projects/p/jobs"))
            .respond_with(ResponseTemplate::new(403).set_body_json(rate_limited()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/bigquery/v2/projects/p/jobs"))
            .respond_with(|req: &Request| {
                let mut job: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
                job["status"] = json!({"state": "RUNNING"});
                ResponseTemplate::new(200).set_body_json(job)
            })
            .mount(&server)
            .await;

        let client = BigqueryJobClient::new(mock_client(&server.uri()));
        let job = client.create(&query_job(), None).await.unwrap();
        assert!(job.job_reference.job_id.starts_with("job_"));
        assert_eq!(job.status.state, JobState::Running);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
        assert_eq!(first["jobReference"]["jobId"], second["jobReference"]["jobId"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_get_and_cancel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/jobs/j1"))
            .and(query_param("location", "EU"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobReference": {"projectId": "p", "jobId": "j1", "location": "EU"},
                "configuration": {"jobType": "QUERY", "query": {"query": "SELECT 1"}},
                "status": {"state": "DONE", "errorResult": {"reason": "invalidQuery", "message": "bad"}}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/bigquery/v2/projects/p/jobs/j1/cancel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "bigquery#jobCancelResponse",
                "job": {
                    "jobReference": {"projectId": "p", "jobId": "j1"},
                    "configuration": {},
                    "status": {"state": "RUNNING"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryJobClient::new(mock_client(&server.uri()));
        let req = GetJobRequest {
            location: Some("EU".to_string()),
        };
        let job = client.get("p", "j1", &req, None).await.unwrap();
        assert!(job.is_done());
        assert_eq!(job.error().and_then(|e| e.reason.as_deref()), Some("invalidQuery"));

        let cancelled = client
            .cancel("p", "j1", &CancelJobRequest::default(), None)
            .await
            .unwrap();
        assert_eq!(cancelled.job.status.state, JobState::Running);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_jobs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/jobs"))
            .and(query_param("projection", "full"))
            .and(query_param("stateFilter", "done"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobs": [
                    {"id": "p:EU.a", "jobReference": {"projectId": "p", "jobId": "a"}, "state": "DONE"},
                    {"id": "p:EU.b", "jobReference": {"projectId": "p", "jobId": "b"}, "state": "DONE"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryJobClient::new(mock_client(&server.uri()));
        let req = ListJobsRequest {
            projection: Some(Projection::Full),
            state_filter: Some(StateFilter::Done),
            ..Default::default()
        };
        let ids: Vec<String> = client
            .list_stream("p", &req)
            .map(|j| j.unwrap().job_reference.job_id)
            .collect()
            .await;
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_query_sets_request_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bigquery/v2/projects/p/queries"))
            .and(body_partial_json(json!({"query": "SELECT 1", "useLegacySql": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobReference": {"projectId": "p", "jobId": "j1", "location": "US"},
                "jobComplete": true,
                "totalRows": "1",
                "schema": {"fields": [{"name": "f0_", "type": "INTEGER"}]},
                "rows": [{"f": [{"v": "1"}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryJobClient::new(mock_client(&server.uri()));
        let req = QueryRequest {
            query: "SELECT 1".to_string(),
            ..Default::default()
        };
        let response = client.query("p", &req, None).await.unwrap();
        assert!(response.job_complete);
        assert_eq!(response.total_rows, Some(1));

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body["requestId"].as_str().unwrap().starts_with("request_"));
    }

    #[tokio::test]
    #[serial]
    async fn test_get_query_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/queries/j1"))
            .and(query_param("startIndex", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobReference": {"projectId": "p", "jobId": "j1"},
                "jobComplete": false
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = BigqueryJobClient::new(mock_client(&server.uri()));
        let req = GetQueryResultsRequest {
            start_index: Some(10),
            ..Default::default()
        };
        let response = client.get_query_results("p", "j1", &req, None).await.unwrap();
        assert!(!response.job_complete);
        assert!(response.rows.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_in_chunks() {
        let server = MockServer::start().await;
        let session = format!("{}/session/1", server.uri());
        Mock::given(method("POST"))
            .and(path("/upload/bigquery/v2/projects/p/jobs"))
            .and(query_param("uploadType", "resumable"))
            .and(header_exists("X-Upload-Content-Type"))
            .and(body_partial_json(json!({
                "configuration": {"load": {
                    "destinationTable": {"projectId": "p", "datasetId": "d", "tableId": "t"},
                    "sourceFormat": "CSV"
                }}
            })))
            .respond_with(ResponseTemplate::new(200).insert_header("Location", session.as_str()))
            .expect(1)
            .mount(&server)
            .await;
        let total = CHUNK_ALIGNMENT + 10;
        Mock::given(method("PUT"))
            .and(path("/session/1"))
            .and(header("Content-Range", format!("bytes 0-{}/{}", CHUNK_ALIGNMENT - 1, total).as_str()))
            .respond_with(ResponseTemplate::new(308).insert_header("Range", format!("bytes=0-{}", CHUNK_ALIGNMENT - 1).as_str()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/session/1"))
            .and(header("Content-Range", format!("bytes {}-{}/{}", CHUNK_ALIGNMENT, total - 1, total).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobReference": {"projectId": "p", "jobId": "load_1"},
                "configuration": {"jobType": "LOAD"},
                "status": {"state": "PENDING"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryJobClient::new(mock_client(&server.uri()));
        let job = Job {
            job_reference: JobReference {
                project_id: "p".to_string(),
                job_id: "load_1".to_string(),
                location: None,
            },
            configuration: JobConfiguration {
                load: Some(JobConfigurationLoad {
                    destination_table: TableReference::new("p", "d", "t"),
                    source_format: Some(SourceFormat::Csv),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        let data = vec![b'a'; total];
        // A chunk size that is not aligned is rounded down.
        let inserted = client.upload(&job, data, CHUNK_ALIGNMENT + 100, None).await.unwrap();
        assert_eq!(inserted.job_reference.job_id, "load_1");
        assert_eq!(inserted.configuration.job_type, "LOAD");
    }

    #[tokio::test]
    #[serial]
    async fn test_prepare_without_location() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        let client = BigqueryJobClient::new(mock_client(&server.uri()));
        let result = client.prepare_resumable_upload(&query_job(), None).await;
        assert!(result.is_err());
    }
}
