use futures_util::Stream;

use google_cloud_gax::http::HttpClient;
use google_cloud_gax::paging;
use google_cloud_gax::retry::{invoke, RetrySetting};

use crate::http::events::list::{ListEventsRequest, ListEventsResponse};
use crate::http::events::{ErrorEvent, ReportedErrorEvent};
use crate::http::group_stats::list::{ListGroupStatsRequest, ListGroupStatsResponse};
use crate::http::group_stats::ErrorGroupStats;
use crate::http::groups::ErrorGroup;
use crate::http::{events, group_stats, groups, project_name, CancellationToken, Error};

pub const SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/cloud-platform"];

/// Error Reporting API v1beta1.
///
/// Reads, deletes and group updates are retried with the configured [`RetrySetting`].
/// Reported events are sent once.
#[derive(Clone, Debug)]
pub struct ErrorReportingClient {
    http: HttpClient,
    endpoint: String,
    retry: RetrySetting,
}

impl ErrorReportingClient {
    /// `http` must point at the service root, such as `https://clouderrorreporting.googleapis.com`.
    pub fn new(http: HttpClient, retry: RetrySetting) -> Self {
        let endpoint = format!("{}/v1beta1", http.endpoint().trim_end_matches('/'));
        Self { http, endpoint, retry }
    }

    /// One page of group statistics.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_group_stats(
        &self,
        req: &ListGroupStatsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListGroupStatsResponse, Error> {
        let req = &ListGroupStatsRequest {
            project_name: project_name(&req.project_name)?,
            ..req.clone()
        };
        let action = || async move {
            let builder = group_stats::list::build(self.endpoint.as_str(), self.http.http(), req)?;
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Every group statistic from `req.page_token` on.
    pub async fn list_group_stats_all(
        &self,
        req: &ListGroupStatsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<ErrorGroupStats>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| {
            let req = ListGroupStatsRequest {
                page_token,
                ..req.clone()
            };
            let cancel = cancel.clone();
            async move { self.list_group_stats(&req, cancel).await }
        })
        .await
    }

    pub fn list_group_stats_stream<'a>(
        &'a self,
        req: &'a ListGroupStatsRequest,
    ) -> impl Stream<Item = Result<ErrorGroupStats, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListGroupStatsRequest {
                page_token,
                ..req.clone()
            };
            self.list_group_stats(&req, None).await
        })
    }

    /// One page of the events of a group, newest first.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_events(
        &self,
        req: &ListEventsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListEventsResponse, Error> {
        if req.group_id.is_empty() {
            return Err(Error::InvalidArgument("group id is required".to_string()));
        }
        let req = &ListEventsRequest {
            project_name: project_name(&req.project_name)?,
            ..req.clone()
        };
        let action = || async move {
            let builder = events::list::build(self.endpoint.as_str(), self.http.http(), req);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    pub async fn list_events_all(
        &self,
        req: &ListEventsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Vec<ErrorEvent>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| {
            let req = ListEventsRequest {
                page_token,
                ..req.clone()
            };
            let cancel = cancel.clone();
            async move { self.list_events(&req, cancel).await }
        })
        .await
    }

    pub fn list_events_stream<'a>(
        &'a self,
        req: &'a ListEventsRequest,
    ) -> impl Stream<Item = Result<ErrorEvent, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListEventsRequest {
                page_token,
                ..req.clone()
            };
            self.list_events(&req, None).await
        })
    }

    /// Deletes every event of the project. Groups disappear once their events are gone.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_events(&self, project: &str, cancel: Option<CancellationToken>) -> Result<(), Error> {
        let project = &project_name(project)?;
        let action = || async move {
            let builder = events::delete::build(self.endpoint.as_str(), self.http.http(), project);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// `group_name` is `projects/{project}/groups/{group}`, see [`group_path`](crate::http::group_path).
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_group(&self, group_name: &str, cancel: Option<CancellationToken>) -> Result<ErrorGroup, Error> {
        if group_name.is_empty() {
            return Err(Error::InvalidArgument("group name is required".to_string()));
        }
        let action = || async move {
            let builder = groups::get::build(self.endpoint.as_str(), self.http.http(), group_name);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Replaces the group identified by `group.name`.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn update_group(
        &self,
        group: &ErrorGroup,
        cancel: Option<CancellationToken>,
    ) -> Result<ErrorGroup, Error> {
        if group.name.is_empty() {
            return Err(Error::InvalidArgument("group name is required".to_string()));
        }
        let action = || async move {
            let builder = groups::update::build(self.endpoint.as_str(), self.http.http(), group);
            self.http.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.retry), action).await
    }

    /// Reports one event. Not retried, a duplicate would be counted twice.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn report_error_event(
        &self,
        project: &str,
        event: &ReportedErrorEvent,
        cancel: Option<CancellationToken>,
    ) -> Result<(), Error> {
        if event.service_context.service.is_empty() {
            return Err(Error::InvalidArgument("service context requires a service".to_string()));
        }
        let project = &project_name(project)?;
        let action = || async move {
            let builder = events::report::build(self.endpoint.as_str(), self.http.http(), project, event);
            self.http.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&RetrySetting::none()), action).await
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::time::Duration;

    use futures_util::{pin_mut, StreamExt};
    use serde_json::json;
    use serial_test::serial;
    use time::macros::datetime;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use google_cloud_gax::http::HttpClient;
    use google_cloud_gax::retry::RetrySetting;

    use crate::http::error_reporting_client::ErrorReportingClient;
    use crate::http::events::list::ListEventsRequest;
    use crate::http::events::{ReportedErrorEvent, ServiceContext};
    use crate::http::group_stats::list::ListGroupStatsRequest;
    use crate::http::group_stats::{ErrorGroupOrder, TimedCountAlignment};
    use crate::http::groups::{ErrorGroup, ResolutionStatus, TrackingIssue};
    use crate::http::{group_path, CancellationToken, Error, Period, QueryTimeRange, ServiceContextFilter};

    #[ctor::ctor]
    fn init() {
        let filter = tracing_subscriber::filter::EnvFilter::from_default_env()
            .add_directive("gcloud_rest_error_reporting=trace".parse().unwrap());
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    pub fn fast_retry() -> RetrySetting {
        RetrySetting {
            from_millis: 1,
            max_delay: Some(Duration::from_millis(10)),
            factor: 1,
            take: 3,
            ..Default::default()
        }
    }

    pub fn mock_client(endpoint: &str) -> ErrorReportingClient {
        let http = HttpClient::new(
            None,
            endpoint,
            reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build(),
            "gcloud-rest-error-reporting",
            false,
        );
        ErrorReportingClient::new(http, fast_retry())
    }

    #[tokio::test]
    #[serial]
    async fn test_list_group_stats_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta1/projects/p/groupStats"))
            .and(query_param("timeRange.period", "PERIOD_1_DAY"))
            .and(query_param("serviceFilter.service", "api"))
            .and(query_param("timedCountDuration", "3600s"))
            .and(query_param("alignment", "ALIGNMENT_EQUAL_ROUNDED"))
            .and(query_param("alignmentTime", "2024-05-01T00:00:00Z"))
            .and(query_param("order", "COUNT_DESC"))
            .and(query_param("pageSize", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errorGroupStats": [{
                    "group": {"name": "projects/p/groups/g1", "groupId": "g1"},
                    "count": "7"
                }],
                "timeRangeBegin": "2024-04-30T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let res = client
            .list_group_stats(
                &ListGroupStatsRequest {
                    project_name: "p".to_string(),
                    time_range: Some(QueryTimeRange::new(Period::OneDay)),
                    service_filter: Some(ServiceContextFilter {
                        service: Some("api".to_string()),
                        ..Default::default()
                    }),
                    timed_count_duration: Some(Duration::from_secs(3600)),
                    alignment: Some(TimedCountAlignment::EqualRounded),
                    alignment_time: Some(datetime!(2024-05-01 00:00:00 UTC)),
                    order: Some(ErrorGroupOrder::CountDesc),
                    page_size: Some(10),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(res.error_group_stats[0].count, 7);
        assert_eq!(res.time_range_begin, Some(datetime!(2024-04-30 00:00:00 UTC)));
    }

    #[tokio::test]
    #[serial]
    async fn test_list_group_stats_all_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta1/projects/p/groupStats"))
            .and(query_param("pageToken", "n1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errorGroupStats": [{"group": {"groupId": "g3"}, "count": "1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1beta1/projects/p/groupStats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errorGroupStats": [
                    {"group": {"groupId": "g1"}, "count": "9"},
                    {"group": {"groupId": "g2"}, "count": "4"}
                ],
                "nextPageToken": "n1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let req = ListGroupStatsRequest {
            project_name: "projects/p".to_string(),
            group_id: vec!["g1".to_string(), "g2".to_string(), "g3".to_string()],
            ..Default::default()
        };
        let stats = client.list_group_stats_all(&req, None).await.unwrap();
        let ids: Vec<_> = stats.iter().map(|s| s.group.group_id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2", "g3"]);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query_pairs().filter(|(k, _)| k == "groupId").count(), 3);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_events_stream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta1/projects/p/events"))
            .and(query_param("groupId", "g1"))
            .and(query_param("pageToken", "e2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errorEvents": [{"message": "third", "serviceContext": {"service": "api"}}],
                "nextPageToken": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1beta1/projects/p/events"))
            .and(query_param("groupId", "g1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errorEvents": [
                    {"message": "first", "serviceContext": {"service": "api"}},
                    {"message": "second", "serviceContext": {"service": "api"}}
                ],
                "nextPageToken": "e2"
            })))
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let req = ListEventsRequest {
            project_name: "p".to_string(),
            group_id: "g1".to_string(),
            ..Default::default()
        };
        let stream = client.list_events_stream(&req);
        pin_mut!(stream);
        let mut messages = vec![];
        while let Some(event) = stream.next().await {
            messages.push(event.unwrap().message);
        }
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_events_requires_group() {
        let client = mock_client("http://localhost:1");
        let err = client
            .list_events(
                &ListEventsRequest {
                    project_name: "p".to_string(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_events_retried() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1beta1/projects/p/events"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"code": 503, "message": "unavailable"}
            })))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v1beta1/projects/p/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        client.delete_events("p", None).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_get_and_update_group() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta1/projects/p/groups/g1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/p/groups/g1",
                "groupId": "g1",
                "resolutionStatus": "OPEN"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v1beta1/projects/p/groups/g1"))
            .and(body_json(json!({
                "name": "projects/p/groups/g1",
                "groupId": "g1",
                "trackingIssues": [{"url": "https://issues.example.com/1"}],
                "resolutionStatus": "RESOLVED"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/p/groups/g1",
                "groupId": "g1",
                "trackingIssues": [{"url": "https://issues.example.com/1"}],
                "resolutionStatus": "RESOLVED"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let mut group = client.get_group(&group_path("p", "g1"), None).await.unwrap();
        assert_eq!(group.resolution_status, ResolutionStatus::Open);
        group.resolution_status = ResolutionStatus::Resolved;
        group.tracking_issues.push(TrackingIssue {
            url: "https://issues.example.com/1".to_string(),
        });
        let updated = client.update_group(&group, None).await.unwrap();
        assert_eq!(updated, group);

        let err = client.update_group(&ErrorGroup::default(), None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    #[serial]
    async fn test_report_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta1/projects/p/events:report"))
            .and(body_json(json!({
                "serviceContext": {"service": "api"},
                "message": "boom"
            })))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"code": 503, "message": "unavailable"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let event = ReportedErrorEvent {
            service_context: ServiceContext::new("api", None),
            message: "boom".to_string(),
            ..Default::default()
        };
        let err = client.report_error_event("p", &event, None).await.unwrap_err();
        assert_eq!(err.http_status(), Some(503));
    }

    #[tokio::test]
    #[serial]
    async fn test_cancelled_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta1/projects/p/groupStats"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = mock_client(&server.uri());
        let cancel = CancellationToken::new();
        let child = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            child.cancel();
        });
        let err = client
            .list_group_stats(
                &ListGroupStatsRequest {
                    project_name: "p".to_string(),
                    ..Default::default()
                },
                Some(cancel),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
