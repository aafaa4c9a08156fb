use std::sync::Arc;

use futures_util::Stream;

use google_cloud_gax::paging;
use google_cloud_gax::retry::invoke;

use crate::http::bigquery_client::BigqueryClient;
use crate::http::dataset;
use crate::http::dataset::delete::DeleteDatasetRequest;
use crate::http::dataset::list::{DatasetOverview, ListDatasetsRequest, ListDatasetsResponse};
use crate::http::dataset::Dataset;
use crate::http::{CancellationToken, Error};
use crate::updater::DatasetUpdater;

#[derive(Debug, Clone)]
pub struct BigqueryDatasetClient {
    inner: Arc<BigqueryClient>,
}

impl BigqueryDatasetClient {
    pub fn new(inner: Arc<BigqueryClient>) -> Self {
        Self { inner }
    }

    /// Creates a new empty dataset. Not retried.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create(&self, metadata: &Dataset, cancel: Option<CancellationToken>) -> Result<Dataset, Error> {
        let retry = self.inner.retry_if(false);
        let action = || async move {
            let builder = dataset::insert::build(self.inner.endpoint(), self.inner.http(), metadata);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// Sends the set fields of `metadata`. Retried only when the etag guards the patch.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn patch(&self, metadata: &Dataset, cancel: Option<CancellationToken>) -> Result<Dataset, Error> {
        let retry = self.inner.retry_if(!metadata.etag.is_empty());
        let action = || async move {
            let builder = dataset::patch::build(self.inner.endpoint(), self.inner.http(), metadata);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// Applies the changes recorded by `f` with one conditional PATCH.
    /// No request is sent when `f` changes nothing.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn update<F>(&self, metadata: &Dataset, f: F, cancel: Option<CancellationToken>) -> Result<Dataset, Error>
    where
        F: FnOnce(&mut DatasetUpdater),
    {
        let mut updater = DatasetUpdater::new(metadata);
        f(&mut updater);
        if updater.updates().is_empty() {
            return Ok(metadata.clone());
        }
        let body = &updater.into_patch()?;
        let retry = self.inner.retry_if(!metadata.etag.is_empty());
        let action = || async move {
            let builder = dataset::patch::build_raw(
                self.inner.endpoint(),
                self.inner.http(),
                &metadata.dataset_reference,
                metadata.etag.as_str(),
                body,
            );
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// Deletes the dataset. With `force` the tables it contains are deleted too.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete(
        &self,
        project_id: &str,
        dataset_id: &str,
        force: bool,
        cancel: Option<CancellationToken>,
    ) -> Result<(), Error> {
        let req = &DeleteDatasetRequest { delete_contents: force };
        let action = || async move {
            let builder = dataset::delete::build(self.inner.endpoint(), self.inner.http(), project_id, dataset_id, req);
            self.inner.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(
        &self,
        project_id: &str,
        dataset_id: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<Dataset, Error> {
        let action = || async move {
            let builder = dataset::get::build(self.inner.endpoint(), self.inner.http(), project_id, dataset_id);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    /// One page of datasets.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_page(
        &self,
        project_id: &str,
        req: &ListDatasetsRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListDatasetsResponse, Error> {
        let action = || async move {
            let builder = dataset::list::build(self.inner.endpoint(), self.inner.http(), project_id, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    /// Every dataset of the project, all pages concatenated.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list(&self, project_id: &str, req: &ListDatasetsRequest) -> Result<Vec<DatasetOverview>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| async move {
            let req = ListDatasetsRequest {
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
        req: &'a ListDatasetsRequest,
    ) -> impl Stream<Item = Result<DatasetOverview, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListDatasetsRequest {
                page_token,
                ..req.clone()
            };
            self.list_page(project_id, &req, None).await
        })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::bigquery_client::test::{mock_client, rate_limited};
    use crate::http::bigquery_dataset_client::BigqueryDatasetClient;
    use crate::http::dataset::list::ListDatasetsRequest;
    use crate::http::dataset::{Access, Dataset, DatasetReference, SpecialGroup};

    #[tokio::test]
    #[serial]
    async fn test_create_dataset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bigquery/v2/projects/p/datasets"))
            .and(body_json(json!({
                "datasetReference": {"projectId": "p", "datasetId": "logs"},
                "location": "asia-northeast1",
                "access": [
                    {"role": "OWNER", "specialGroup": "projectOwners"},
                    {"role": "READER", "userByEmail": "reader@example.com"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "bigquery#dataset",
                "etag": "e1",
                "id": "p:logs",
                "datasetReference": {"projectId": "p", "datasetId": "logs"},
                "creationTime": "1700000000000",
                "location": "asia-northeast1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryDatasetClient::new(mock_client(&server.uri()));
        let dataset = client
            .create(
                &Dataset {
                    dataset_reference: DatasetReference::new("p", "logs"),
                    location: "asia-northeast1".to_string(),
                    access: vec![
                        Access::special("OWNER", SpecialGroup::ProjectOwners),
                        Access::user("READER", "reader@example.com"),
                    ],
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(dataset.id, "p:logs");
        assert_eq!(dataset.creation_time, Some(1700000000000));
    }

    #[tokio::test]
    #[serial]
    async fn test_get_retries_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets/logs"))
            .respond_with(ResponseTemplate::new(403).set_body_json(rate_limited()))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "datasetReference": {"projectId": "p", "datasetId": "logs"}
            })))
            .mount(&server)
            .await;

        let client = BigqueryDatasetClient::new(mock_client(&server.uri()));
        let dataset = client.get("p", "logs", None).await.unwrap();
        assert_eq!(dataset.dataset_reference.dataset_id, "logs");
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    #[serial]
    async fn test_get_not_found_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"code": 404, "message": "Not found: Dataset p:none", "errors": [{"reason": "notFound"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = BigqueryDatasetClient::new(mock_client(&server.uri()));
        let err = client.get("p", "none", None).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_force() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/bigquery/v2/projects/p/datasets/logs"))
            .and(query_param("deleteContents", "true"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = BigqueryDatasetClient::new(mock_client(&server.uri()));
        client.delete("p", "logs", true, None).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_list_all_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets"))
            .and(query_param("pageToken", "t2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "datasets": [{"id": "p:c", "datasetReference": {"projectId": "p", "datasetId": "c"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets"))
            .and(query_param("maxResults", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "datasets": [
                    {"id": "p:a", "datasetReference": {"projectId": "p", "datasetId": "a"}},
                    {"id": "p:b", "datasetReference": {"projectId": "p", "datasetId": "b"}}
                ],
                "nextPageToken": "t2"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let client = BigqueryDatasetClient::new(mock_client(&server.uri()));
        let datasets = client
            .list(
                "p",
                &ListDatasetsRequest {
                    max_results: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let ids: Vec<&str> = datasets.iter().map(|d| d.dataset_reference.dataset_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_update_sends_only_changes() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/bigquery/v2/projects/p/datasets/logs"))
            .and(header("If-Match", "e1"))
            .and(body_json(json!({
                "description": "access logs",
                "labels": {"env": "prod"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "etag": "e2",
                "datasetReference": {"projectId": "p", "datasetId": "logs"},
                "description": "access logs",
                "labels": {"env": "prod"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryDatasetClient::new(mock_client(&server.uri()));
        let dataset = Dataset {
            etag: "e1".to_string(),
            dataset_reference: DatasetReference::new("p", "logs"),
            friendly_name: Some("Logs".to_string()),
            ..Default::default()
        };
        let unchanged = client.update(&dataset, |_| {}, None).await.unwrap();
        assert_eq!(unchanged, dataset);

        let updated = client
            .update(
                &dataset,
                |d| {
                    d.set_description(Some("access logs".to_string()));
                    d.labels_mut().insert("env".to_string(), "prod".to_string());
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.etag, "e2");
        assert_eq!(
            updated.labels,
            Some(HashMap::from([("env".to_string(), "prod".to_string())]))
        );
    }
}
