use std::sync::Arc;

use futures_util::Stream;

use google_cloud_gax::paging;
use google_cloud_gax::retry::invoke;

use crate::http::bigquery_client::BigqueryClient;
use crate::http::project;
use crate::http::project::list::{ListProjectsRequest, ListProjectsResponse, ProjectOverview};
use crate::http::{CancellationToken, Error};

#[derive(Debug, Clone)]
pub struct BigqueryProjectClient {
    inner: Arc<BigqueryClient>,
}

impl BigqueryProjectClient {
    pub fn new(inner: Arc<BigqueryClient>) -> Self {
        Self { inner }
    }

    /// One page of the projects the caller has been granted any project role.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_page(
        &self,
        req: &ListProjectsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListProjectsResponse, Error> {
        let action = || async move {
            let builder = project::list::build(self.inner.endpoint(), self.inner.http(), req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list(&self, req: &ListProjectsRequest) -> Result<Vec<ProjectOverview>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| async move {
            let req = ListProjectsRequest {
                page_token,
                ..req.clone()
            };
            self.list_page(&req, None).await
        })
        .await
    }

    pub fn list_stream<'a>(
        &'a self,
        req: &'a ListProjectsRequest,
    ) -> impl Stream<Item = Result<ProjectOverview, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListProjectsRequest {
                page_token,
                ..req.clone()
            };
            self.list_page(&req, None).await
        })
    }
}

#[cfg(test)]
mod test {
    use futures_util::StreamExt;
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::bigquery_client::test::{mock_client, rate_limited};
    use crate::http::bigquery_project_client::BigqueryProjectClient;
    use crate::http::project::list::ListProjectsRequest;

    async fn mount_two_pages(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects"))
            .and(query_param("pageToken", "t2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "bigquery#projectList",
                "projects": [
                    {"id": "c", "numericId": "3", "projectReference": {"projectId": "c"}}
                ],
                "totalItems": 1
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects"))
            .and(query_param("maxResults", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "bigquery#projectList",
                "projects": [
                    {"id": "a", "numericId": "1", "projectReference": {"projectId": "a"}, "friendlyName": "A"},
                    {"id": "b", "numericId": "2", "projectReference": {"projectId": "b"}}
                ],
                "nextPageToken": "t2",
                "totalItems": 2
            })))
            .up_to_n_times(1)
            .mount(server)
            .await;
    }

    fn request() -> ListProjectsRequest {
        ListProjectsRequest {
            max_results: Some(2),
            ..Default::default()
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_list_page() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;
        let client = BigqueryProjectClient::new(mock_client(&server.uri()));
        let page = client.list_page(&request(), None).await.unwrap();
        assert_eq!(page.projects.len(), 2);
        assert_eq!(page.projects[0].numeric_id, Some(1));
        assert_eq!(page.projects[0].friendly_name.as_deref(), Some("A"));
        assert_eq!(page.next_page_token.as_deref(), Some("t2"));
    }

    #[tokio::test]
    #[serial]
    async fn test_list_all_pages() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;
        let client = BigqueryProjectClient::new(mock_client(&server.uri()));
        let projects = client.list(&request()).await.unwrap();
        let ids: Vec<&str> = projects.iter().map(|p| p.project_reference.project_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_stream() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;
        let client = BigqueryProjectClient::new(mock_client(&server.uri()));
        let req = request();
        let ids: Vec<String> = client
            .list_stream(&req)
            .map(|p| p.unwrap().id)
            .collect()
            .await;
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_retries_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects"))
            .respond_with(ResponseTemplate::new(403).set_body_json(rate_limited()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        let client = BigqueryProjectClient::new(mock_client(&server.uri()));
        let projects = client.list(&ListProjectsRequest::default()).await.unwrap();
        assert!(projects.is_empty());
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }
}
