//! Reports Rust errors with the caller's source location.
//!
//! ```
//! use gcloud_rest_error_reporting::client::Client;
//!
//! async fn run(client: Client) {
//!     let reporter = client.reporter("api", Some("1.0.0".to_string())).unwrap();
//!     if let Err(e) = std::fs::read("settings.toml") {
//!         reporter.report(&e).await.unwrap();
//!     }
//! }
//! ```
use std::future::Future;
use std::panic::Location;

use time::OffsetDateTime;

use crate::http::error_reporting_client::ErrorReportingClient;
use crate::http::events::{ErrorContext, ReportedErrorEvent, ServiceContext, SourceLocation};
use crate::http::Error;

/// Sends errors of one service to Error Reporting.
#[derive(Clone, Debug)]
pub struct ErrorReporter {
    client: ErrorReportingClient,
    project: String,
    service_context: ServiceContext,
}

impl ErrorReporter {
    pub fn new(client: ErrorReportingClient, project: impl Into<String>, service_context: ServiceContext) -> Self {
        Self {
            client,
            project: project.into(),
            service_context,
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Reports `err` and its sources, located at the caller.
    #[track_caller]
    pub fn report(&self, err: &dyn std::error::Error) -> impl Future<Output = Result<(), Error>> + '_ {
        let event = self.event(err, ErrorContext::default(), Location::caller());
        async move { self.send(event).await }
    }

    /// Reports `err` with request or user details. The caller's location is used when
    /// `context.report_location` is unset.
    #[track_caller]
    pub fn report_with_context(
        &self,
        err: &dyn std::error::Error,
        context: ErrorContext,
    ) -> impl Future<Output = Result<(), Error>> + '_ {
        let event = self.event(err, context, Location::caller());
        async move { self.send(event).await }
    }

    fn event(&self, err: &dyn std::error::Error, mut context: ErrorContext, location: &Location) -> ReportedErrorEvent {
        if context.report_location.is_none() {
            context.report_location = Some(SourceLocation {
                file_path: location.file().to_string(),
                line_number: location.line() as i32,
                function_name: String::new(),
            });
        }
        ReportedErrorEvent {
            event_time: Some(OffsetDateTime::now_utc()),
            service_context: self.service_context.clone(),
            message: error_chain(err),
            context: Some(context),
        }
    }

    async fn send(&self, event: ReportedErrorEvent) -> Result<(), Error> {
        tracing::debug!("reporting error of {}: {}", self.service_context.service, event.message);
        self.client.report_error_event(&self.project, &event, None).await
    }
}

/// `err` followed by each of its sources.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str("\ncaused by: ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod test {
    use std::fmt;

    use serde_json::{json, Value};
    use serial_test::serial;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::error_reporting_client::test::mock_client;
    use crate::http::events::{ErrorContext, HttpRequestContext, ServiceContext};
    use crate::reporter::{error_chain, ErrorReporter};

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "failed to load settings")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    fn outer() -> Outer {
        Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "settings.toml not found"))
    }

    #[test]
    fn test_error_chain() {
        assert_eq!(
            error_chain(&outer()),
            "failed to load settings\ncaused by: settings.toml not found"
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta1/projects/p/events:report"))
            .and(body_partial_json(json!({
                "serviceContext": {"service": "api", "version": "2"},
                "message": "failed to load settings\ncaused by: settings.toml not found",
                "context": {"reportLocation": {"filePath": file!()}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let reporter = ErrorReporter::new(
            mock_client(&server.uri()),
            "p",
            ServiceContext::new("api", Some("2".to_string())),
        );
        let line = line!() + 1;
        reporter.report(&outer()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["context"]["reportLocation"]["lineNumber"], json!(line));
        assert!(body["eventTime"].is_string());
    }

    #[tokio::test]
    #[serial]
    async fn test_report_with_context() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta1/projects/p/events:report"))
            .and(body_partial_json(json!({
                "context": {
                    "httpRequest": {"method": "POST", "url": "/orders", "responseStatusCode": 500},
                    "user": "u-1"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let reporter = ErrorReporter::new(mock_client(&server.uri()), "projects/p", ServiceContext::new("api", None));
        let context = ErrorContext {
            http_request: Some(HttpRequestContext {
                method: "POST".to_string(),
                url: "/orders".to_string(),
                response_status_code: Some(500),
                ..Default::default()
            }),
            user: Some("u-1".to_string()),
            ..Default::default()
        };
        reporter.report_with_context(&outer(), context).await.unwrap();
    }
}
