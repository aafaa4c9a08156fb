use std::ops::Deref;
use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use token_source::TokenSourceProvider;

use google_cloud_gax::http::HttpClient;
use google_cloud_gax::retry::RetrySetting;

use crate::http::error_reporting_client::ErrorReportingClient;
use crate::http::events::ServiceContext;
use crate::http::Error;
use crate::reporter::ErrorReporter;

const USER_AGENT: &str = concat!("gcloud-rest-error-reporting/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub struct ClientConfig {
    /// Shared HTTP client. When `None` one is built with `timeout`.
    pub http: Option<ClientWithMiddleware>,
    pub endpoint: String,
    /// `None` sends unauthenticated requests.
    pub token_source_provider: Option<Box<dyn TokenSourceProvider>>,
    /// Project that [`Client::reporter`] reports to.
    pub project_id: Option<String>,
    pub retry: RetrySetting,
    pub timeout: Option<Duration>,
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: None,
            endpoint: "https://clouderrorreporting.googleapis.com".to_string(),
            token_source_provider: None,
            project_id: None,
            retry: RetrySetting::default(),
            timeout: Some(Duration::from_secs(30)),
            debug: false,
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
        google_cloud_auth::project::Config::default().with_scopes(&crate::http::error_reporting_client::SCOPES)
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    inner: ErrorReportingClient,
    project_id: Option<String>,
}

impl Deref for Client {
    type Target = ErrorReportingClient;

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
            inner: ErrorReportingClient::new(http, config.retry),
            project_id: config.project_id,
        })
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// A reporter for `service` in the client's project.
    pub fn reporter(&self, service: impl Into<String>, version: Option<String>) -> Result<ErrorReporter, Error> {
        let project = self
            .project_id
            .clone()
            .ok_or_else(|| Error::InvalidArgument("project id is required".to_string()))?;
        Ok(ErrorReporter::new(
            self.inner.clone(),
            project,
            ServiceContext::new(service, version),
        ))
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::{Client, ClientConfig};
    use crate::http::Error;

    #[tokio::test]
    #[serial]
    async fn test_reporter_requires_project() {
        let client = Client::new(ClientConfig::default()).unwrap();
        assert!(matches!(client.reporter("api", None), Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_reporter_uses_client_project() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta1/projects/my-project/events:report"))
            .and(body_partial_json(json!({"serviceContext": {"service": "worker"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(ClientConfig {
            endpoint: server.uri(),
            project_id: Some("my-project".to_string()),
            ..Default::default()
        })
        .unwrap();
        let reporter = client.reporter("worker", None).unwrap();
        let err = std::io::Error::other("queue closed");
        reporter.report(&err).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_default_config() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1beta1/projects/p/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
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
        client.delete_events("p", None).await.unwrap();
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }
}
