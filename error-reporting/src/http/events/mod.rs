use time::OffsetDateTime;

pub mod delete;
pub mod list;
pub mod report;

/// The service that produced an error.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceContext {
    /// An identifier of the service, such as the name of the executable or job.
    pub service: String,
    /// The version of the service, such as a git tag or a build number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Set by the service for App Engine and Cloud Functions. Never sent.
    #[serde(default, skip_serializing)]
    pub resource_type: Option<String>,
}

impl ServiceContext {
    pub fn new(service: impl Into<String>, version: Option<String>) -> Self {
        Self {
            service: service.into(),
            version,
            resource_type: None,
        }
    }
}

/// The HTTP request that was being processed when the error happened.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestContext {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub method: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub referrer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_status_code: Option<i32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remote_ip: String,
}

/// Where the error was reported in the source code.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub file_path: String,
    /// 1-based. 0 when unknown.
    #[serde(default)]
    pub line_number: i32,
    /// Human readable name of a function or method, such as `my_crate::handler::get`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub function_name: String,
}

/// The repository revision the service was built from.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    /// A URI string identifying the repository, e.g. `https://github.com/owner/repo`.
    #[serde(default)]
    pub repository: String,
    /// The canonical commit id.
    #[serde(default)]
    pub revision_id: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_request: Option<HttpRequestContext>,
    /// The user who caused or was affected by the crash, such as a user id or an email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Required when the message carries no stack trace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_location: Option<SourceLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_references: Vec<SourceReference>,
}

/// An event as stored by the service.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEvent {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub event_time: Option<OffsetDateTime>,
    #[serde(default)]
    pub service_context: ServiceContext,
    /// The stack trace or the message of the error.
    #[serde(default)]
    pub message: String,
    pub context: Option<ErrorContext>,
}

/// An event sent by [`report_error_event`](crate::http::error_reporting_client::ErrorReportingClient::report_error_event).
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportedErrorEvent {
    /// When the error happened. The time of receipt is used when unset.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_time: Option<OffsetDateTime>,
    pub service_context: ServiceContext,
    /// A stack trace in one of the supported language formats, or a plain message
    /// together with `context.report_location`.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use time::macros::datetime;

    use crate::http::events::{ErrorContext, ErrorEvent, ReportedErrorEvent, ServiceContext, SourceLocation};

    #[test]
    fn test_reported_event_body() {
        let event = ReportedErrorEvent {
            event_time: Some(datetime!(2024-05-01 10:00:00 UTC)),
            service_context: ServiceContext::new("api", Some("1.2.0".to_string())),
            message: "connection refused".to_string(),
            context: Some(ErrorContext {
                report_location: Some(SourceLocation {
                    file_path: "src/main.rs".to_string(),
                    line_number: 42,
                    function_name: "main".to_string(),
                }),
                ..Default::default()
            }),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "eventTime": "2024-05-01T10:00:00Z",
                "serviceContext": {"service": "api", "version": "1.2.0"},
                "message": "connection refused",
                "context": {"reportLocation": {"filePath": "src/main.rs", "lineNumber": 42, "functionName": "main"}}
            })
        );
    }

    #[test]
    fn test_decode_event() {
        let event: ErrorEvent = serde_json::from_value(json!({
            "eventTime": "2024-05-01T10:00:00.123456Z",
            "serviceContext": {"service": "default", "version": "v1", "resourceType": "gae_app"},
            "message": "panicked at src/lib.rs:3:5",
            "context": {"httpRequest": {"method": "GET", "url": "/", "responseStatusCode": 500}}
        }))
        .unwrap();
        assert_eq!(event.service_context.resource_type.as_deref(), Some("gae_app"));
        assert_eq!(
            event.context.and_then(|c| c.http_request).and_then(|r| r.response_status_code),
            Some(500)
        );
        assert_eq!(event.event_time, Some(datetime!(2024-05-01 10:00:00.123456 UTC)));
    }
}
