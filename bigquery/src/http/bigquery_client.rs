use reqwest::Response;
use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use google_cloud_gax::http::HttpClient;
use google_cloud_gax::retry::RetrySetting;

use crate::http::Error;

pub const SCOPES: [&str; 7] = [
    "https://www.googleapis.com/auth/bigquery",
    "https://www.googleapis.com/auth/bigquery.insertdata",
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/cloud-platform.read-only",
    "https://www.googleapis.com/auth/devstorage.full_control",
    "https://www.googleapis.com/auth/devstorage.read_only",
    "https://www.googleapis.com/auth/devstorage.read_write",
];

/// BigQuery REST API v2 transport shared by the resource clients.
#[derive(Debug, Clone)]
pub struct BigqueryClient {
    http: HttpClient,
    endpoint: String,
    upload_endpoint: String,
    retry: RetrySetting,
}

impl BigqueryClient {
    /// `http` must point at the service root, such as `https://bigquery.googleapis.com`.
    pub fn new(http: HttpClient, retry: RetrySetting) -> Self {
        let endpoint = http.endpoint().trim_end_matches('/').to_string();
        Self {
            endpoint: format!("{endpoint}/bigquery/v2"),
            upload_endpoint: format!("{endpoint}/upload/bigquery/v2"),
            http,
            retry,
        }
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub(crate) fn upload_endpoint(&self) -> &str {
        self.upload_endpoint.as_str()
    }

    pub(crate) fn http(&self) -> &Client {
        self.http.http()
    }

    /// The configured policy when `idempotent`, otherwise a single attempt.
    pub(crate) fn retry_if(&self, idempotent: bool) -> RetrySetting {
        if idempotent {
            self.retry.clone()
        } else {
            RetrySetting::none()
        }
    }

    pub async fn send<T>(&self, builder: RequestBuilder) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        self.http.send(builder).await
    }

    pub async fn send_get_empty(&self, builder: RequestBuilder) -> Result<(), Error> {
        self.http.send_get_empty(builder).await
    }

    pub async fn send_raw(&self, builder: RequestBuilder) -> Result<Response, Error> {
        self.http.send_raw(builder).await
    }
}
