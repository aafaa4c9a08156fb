use std::ops::Deref;
use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use token_source::TokenSourceProvider;

use google_cloud_gax::cancel::with_cancel;
use google_cloud_gax::http::HttpClient;
use google_cloud_gax::retry::RetrySetting;

use crate::http::content::inspect::InspectContentRequest;
use crate::http::content::{ContentItem, Finding, InspectConfig};
use crate::http::dlp_client::DlpClient;
use crate::http::dlp_jobs::DlpJob;
use crate::http::{project_path, CancellationToken, Error};

const USER_AGENT: &str = concat!("gcloud-rest-dlp/", env!("CARGO_PKG_VERSION"));

/// Upper bound of the delay between two polls of [`Client::wait_for_dlp_job`].
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(32);

#[derive(Debug)]
pub struct ClientConfig {
    /// Shared HTTP client. When `None` one is built with `timeout`.
    pub http: Option<ClientWithMiddleware>,
    pub endpoint: String,
    /// `None` sends unauthenticated requests.
    pub token_source_provider: Option<Box<dyn TokenSourceProvider>>,
    /// Parent of the requests sent by [`Client::inspect_text`].
    pub project_id: Option<String>,
    pub retry: RetrySetting,
    pub timeout: Option<Duration>,
    pub debug: bool,
    /// First delay of [`Client::wait_for_dlp_job`]. Doubled after every poll.
    pub job_poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: None,
            endpoint: "https://dlp.googleapis.com".to_string(),
            token_source_provider: None,
            project_id: None,
            retry: RetrySetting::default(),
            timeout: Some(Duration::from_secs(60)),
            debug: false,
            job_poll_interval: Duration::from_secs(1),
        }
    }
}

#[cfg(feature = "auth")]
pub use google_cloud_auth;

#[cfg(feature = "auth")]
impl ClientConfig {
    pub async fn with_auth(self) -> Result<Self, google_cloud_auth::error::Error> {
        let ts = google_cloud_auth::token::DefaultTokenSourceProvider::new(Self::auth_config()).await?;
        Ok(self.with_token_source(ts).await)
    }

    pub async fn with_credentials(
        self,
        credentials: google_cloud_auth::credentials::CredentialsFile,
    ) -> Result<Self, google_cloud_auth::error::Error> {
        let ts = google_cloud_auth::token::DefaultTokenSourceProvider::new_with_credentials(
            Self::auth_config(),
            Box::new(credentials),
        )
        .await?;
        Ok(self.with_token_source(ts).await)
    }

    async fn with_token_source(mut self, ts: google_cloud_auth::token::DefaultTokenSourceProvider) -> Self {
        if self.project_id.is_none() {
            self.project_id = match &ts.source_credentials {
                Some(cred) => cred.project_id.clone(),
                None => Some(google_cloud_metadata::project_id().await),
            };
        }
        self.token_source_provider = Some(Box::new(ts));
        self
    }

    fn auth_config() -> google_cloud_auth::project::Config<'static> {
        google_cloud_auth::project::Config::default().with_scopes(&crate::http::dlp_client::SCOPES)
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    inner: DlpClient,
    project_id: Option<String>,
    job_poll_interval: Duration,
}

impl Deref for Client {
    type Target = DlpClient;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client {
    /// Fails only when the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let ts = match config.token_source_provider {
            Some(tsp) => Some(tsp.token_source()),
            None => {
                tracing::trace!("Use anonymous access due to lack of token");
                None
            }
        };
        let http = match config.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = config.timeout {
                    builder = builder.timeout(timeout);
                }
                ClientBuilder::new(builder.build()?).build()
            }
        };
        let http = HttpClient::new(ts, config.endpoint, http, USER_AGENT, config.debug);
        Ok(Self {
            inner: DlpClient::new(http, config.retry),
            project_id: config.project_id,
            job_poll_interval: config.job_poll_interval,
        })
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    fn project(&self) -> Result<&str, Error> {
        self.project_id()
            .ok_or_else(|| Error::InvalidArgument("project id is required".to_string()))
    }

    /// Inspects `text` in the client's project.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn inspect_text(
        &self,
        text: impl Into<String>,
        config: InspectConfig,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<Finding>, Error> {
        let req = InspectContentRequest {
            parent: project_path(self.project()?),
            inspect_config: Some(config),
            item: Some(ContentItem::text(text)),
            inspect_template_name: None,
        };
        let res = self.inner.inspect_content(&req, cancel).await?;
        if res.result.findings_truncated {
            tracing::debug!("{} findings returned, more were found", res.result.findings.len());
        }
        Ok(res.result.findings)
    }

    /// Polls `job` until it is done, cancelled or failed.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn wait_for_dlp_job(&self, job: &DlpJob, cancel: Option<CancellationToken>) -> Result<DlpJob, Error> {
        if job.state.is_terminal() {
            return Ok(job.clone());
        }
        let mut delay = self.job_poll_interval;
        let action = async {
            loop {
                tokio::time::sleep(delay).await;
                let current = self.inner.get_dlp_job(&job.name, None).await?;
                if current.state.is_terminal() {
                    return Ok(current);
                }
                tracing::debug!("dlp job {} is {:?}", job.name, current.state);
                delay = (delay * 2).min(MAX_POLL_INTERVAL);
            }
        };
        with_cancel(cancel.as_ref(), action).await
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::{Client, ClientConfig};
    use crate::http::content::{InfoType, InspectConfig};
    use crate::http::dlp_jobs::{DlpJob, JobState};
    use crate::http::info_types::list::ListInfoTypesRequest;
    use crate::http::{CancellationToken, Error};

    fn client(server: &MockServer) -> Client {
        Client::new(ClientConfig {
            endpoint: server.uri(),
            project_id: Some("p".to_string()),
            job_poll_interval: Duration::from_millis(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_inspect_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/projects/p/content:inspect"))
            .and(body_partial_json(json!({"item": {"value": "a@example.com"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"findings": [{"infoType": {"name": "EMAIL_ADDRESS"}, "likelihood": "LIKELY"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let findings = client(&server)
            .inspect_text(
                "a@example.com",
                InspectConfig {
                    info_types: vec![InfoType::new("EMAIL_ADDRESS")],
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(findings[0].info_type, Some(InfoType::new("EMAIL_ADDRESS")));

        let no_project = Client::new(ClientConfig::default()).unwrap();
        let err = no_project
            .inspect_text("x", InspectConfig::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_wait_for_dlp_job() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/projects/p/dlpJobs/i-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/p/dlpJobs/i-1", "state": "RUNNING"
            })))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/projects/p/dlpJobs/i-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/p/dlpJobs/i-1", "state": "DONE",
                "inspectDetails": {"result": {"processedBytes": "1024", "totalEstimatedBytes": "1024"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let job = DlpJob {
            name: "projects/p/dlpJobs/i-1".to_string(),
            state: JobState::Pending,
            ..Default::default()
        };
        let done = client(&server).wait_for_dlp_job(&job, None).await.unwrap();
        assert_eq!(done.state, JobState::Done);
    }

    #[tokio::test]
    #[serial]
    async fn test_wait_for_dlp_job_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/projects/p/dlpJobs/i-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/p/dlpJobs/i-2", "state": "RUNNING"
            })))
            .mount(&server)
            .await;

        let job = DlpJob {
            name: "projects/p/dlpJobs/i-2".to_string(),
            state: JobState::Running,
            ..Default::default()
        };
        let cancel = CancellationToken::new();
        let child = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            child.cancel();
        });
        let err = client(&server).wait_for_dlp_job(&job, Some(cancel)).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    #[serial]
    async fn test_default_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/infoTypes"))
            .and(query_param("languageCode", "ja-JP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "infoTypes": [{"name": "EMAIL_ADDRESS", "displayName": "Email address"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::default();
        assert!(config.token_source_provider.is_none());
        let client = Client::new(ClientConfig {
            endpoint: server.uri(),
            ..config
        })
        .unwrap();
        let response = client
            .list_info_types(
                &ListInfoTypesRequest {
                    language_code: Some("ja-JP".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(response.info_types[0].name, "EMAIL_ADDRESS");
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }
}
