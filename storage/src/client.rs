use std::ops::Deref;
use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use token_source::TokenSourceProvider;

use google_cloud_gax::http::HttpClient;
use google_cloud_gax::retry::RetrySetting;

use crate::http::storage_client::StorageClient;
use crate::http::Error;

const USER_AGENT: &str = concat!("gcloud-rest-storage/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub struct ClientConfig {
    /// Shared HTTP client. When `None` one is built with `timeout`.
    pub http: Option<ClientWithMiddleware>,
    pub storage_endpoint: String,
    /// `None` sends unauthenticated requests. Set by [`ClientConfig::with_auth`] or
    /// [`ClientConfig::with_credentials`] when the `auth` feature is enabled.
    pub token_source_provider: Option<Box<dyn TokenSourceProvider>>,
    /// Used for bucket listing and creation and for expanding bare notification topics.
    pub project_id: Option<String>,
    pub retry: RetrySetting,
    pub timeout: Option<Duration>,
    /// Logs every response body at `info`.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: None,
            storage_endpoint: "https://storage.googleapis.com".to_string(),
            token_source_provider: None,
            project_id: None,
            retry: RetrySetting::default(),
            timeout: Some(Duration::from_secs(60)),
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Access public buckets and objects without credentials.
    pub fn anonymous(mut self) -> Self {
        self.token_source_provider = None;
        self
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
                // Credential file is used.
                Some(cred) => cred.project_id.clone(),
                // On Google Cloud
                None => Some(google_cloud_metadata::project_id().await),
            };
        }
        self.token_source_provider = Some(Box::new(ts));
        self
    }

    fn auth_config() -> google_cloud_auth::project::Config<'static> {
        google_cloud_auth::project::Config::default().with_scopes(&crate::http::storage_client::SCOPES)
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    storage_client: StorageClient,
}

impl Deref for Client {
    type Target = StorageClient;

    fn deref(&self) -> &Self::Target {
        &self.storage_client
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
            None => build_http(config.timeout)?,
        };
        let http = HttpClient::new(ts, config.storage_endpoint, http, USER_AGENT, config.debug);
        Ok(Self {
            storage_client: StorageClient::new(http, config.project_id, config.retry),
        })
    }
}

fn build_http(timeout: Option<Duration>) -> Result<ClientWithMiddleware, Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(ClientBuilder::new(builder.build()?).build())
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::{Client, ClientConfig};
    use crate::http::buckets::get::GetBucketRequest;

    #[tokio::test]
    #[serial]
    async fn test_anonymous_client() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/storage/v1/b/public"))
            .and(header("X-Goog-Api-Client", "rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "public"})))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig {
            storage_endpoint: server.uri(),
            project_id: Some("p".to_string()),
            ..Default::default()
        }
        .anonymous();
        let client = Client::new(config).unwrap();
        assert_eq!(client.project_id(), Some("p"));
        let bucket = client
            .get_bucket(
                &GetBucketRequest {
                    bucket: "public".to_string(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(bucket.name, "public");
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_default_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/storage/v1/b/default"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "default"})))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::default();
        assert!(config.token_source_provider.is_none());
        assert_eq!(config.timeout, Some(std::time::Duration::from_secs(60)));
        let client = Client::new(ClientConfig {
            storage_endpoint: server.uri(),
            ..config
        })
        .unwrap();
        let bucket = client
            .get_bucket(
                &GetBucketRequest {
                    bucket: "default".to_string(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(bucket.name, "default");
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }
}
