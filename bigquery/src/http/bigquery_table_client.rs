use std::sync::Arc;

use futures_util::Stream;

use google_cloud_gax::paging;
use google_cloud_gax::retry::invoke;

use crate::http::bigquery_client::BigqueryClient;
use crate::http::table;
use crate::http::table::get::GetTableRequest;
use crate::http::table::list::{ListTablesRequest, ListTablesResponse, TableOverview};
use crate::http::table::{Table, TableReference};
use crate::http::{CancellationToken, Error};
use crate::updater::TableUpdater;

#[derive(Debug, Clone)]
pub struct BigqueryTableClient {
    inner: Arc<BigqueryClient>,
}

impl BigqueryTableClient {
    pub fn new(inner: Arc<BigqueryClient>) -> Self {
        Self { inner }
    }

    /// Creates a new, empty table in the dataset. Not retried.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create(&self, metadata: &Table, cancel: Option<CancellationToken>) -> Result<Table, Error> {
        let retry = self.inner.retry_if(false);
        let action = || async move {
            let builder = table::insert::build(self.inner.endpoint(), self.inner.http(), metadata);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// Sends the set fields of `metadata` guarded by its etag.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn patch(&self, metadata: &Table, cancel: Option<CancellationToken>) -> Result<Table, Error> {
        let retry = self.inner.retry_if(!metadata.etag.is_empty());
        let action = || async move {
            let builder = table::patch::build(self.inner.endpoint(), self.inner.http(), metadata);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// Applies the changes recorded by `f` with one conditional PATCH.
    /// No request is sent when `f` changes nothing.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn update<F>(&self, metadata: &Table, f: F, cancel: Option<CancellationToken>) -> Result<Table, Error>
    where
        F: FnOnce(&mut TableUpdater),
    {
        let mut updater = TableUpdater::new(metadata);
        f(&mut updater);
        if updater.updates().is_empty() {
            return Ok(metadata.clone());
        }
        let body = &updater.into_patch()?;
        let retry = self.inner.retry_if(!metadata.etag.is_empty());
        let action = || async move {
            let builder = table::patch::build_raw(
                self.inner.endpoint(),
                self.inner.http(),
                &metadata.table_reference,
                metadata.etag.as_str(),
                body,
            );
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete(&self, table: &TableReference, cancel: Option<CancellationToken>) -> Result<(), Error> {
        let action = || async move {
            let builder = table::delete::build(self.inner.endpoint(), self.inner.http(), table);
            self.inner.send_get_empty(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(
        &self,
        table: &TableReference,
        req: &GetTableRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<Table, Error> {
        let action = || async move {
            let builder = table::get::build(self.inner.endpoint(), self.inner.http(), table, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_page(
        &self,
        project_id: &str,
        dataset_id: &str,
        req: &ListTablesRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<ListTablesResponse, Error> {
        let action = || async move {
            let builder = table::list::build(self.inner.endpoint(), self.inner.http(), project_id, dataset_id, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    /// Every table of the dataset, all pages concatenated.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list(
        &self,
        project_id: &str,
        dataset_id: &str,
        req: &ListTablesRequest,
    ) -> Result<Vec<TableOverview>, Error> {
        paging::collect_all(req.page_token.clone(), |page_token| async move {
            let req = ListTablesRequest {
                page_token,
                ..req.clone()
            };
            self.list_page(project_id, dataset_id, &req, None).await
        })
        .await
    }

    pub fn list_stream<'a>(
        &'a self,
        project_id: &'a str,
        dataset_id: &'a str,
        req: &'a ListTablesRequest,
    ) -> impl Stream<Item = Result<TableOverview, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            let req = ListTablesRequest {
                page_token,
                ..req.clone()
            };
            self.list_page(project_id, dataset_id, &req, None).await
        })
    }
}

#[cfg(test)]
mod test {
    use futures_util::StreamExt;
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::bigquery_client::test::{mock_client, rate_limited};
    use crate::http::bigquery_table_client::BigqueryTableClient;
    use crate::http::table::get::{GetTableRequest, TableMetadataView};
    use crate::http::table::list::ListTablesRequest;
    use crate::http::table::{Table, TableFieldSchema, TableFieldType, TableReference, TableSchema};

    fn schema_json() -> serde_json::Value {
        json!({"fields": [
            {"name": "id", "type": "INTEGER", "mode": "REQUIRED"},
            {"name": "tags", "type": "STRING", "mode": "REPEATED"}
        ]})
    }

    #[tokio::test]
    #[serial]
    async fn test_create_table() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables"))
            .and(body_json(json!({
                "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "t"},
                "schema": schema_json()
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "etag": "e1",
                "id": "p:d.t",
                "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "t"},
                "schema": schema_json(),
                "numRows": "0",
                "type": "TABLE"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryTableClient::new(mock_client(&server.uri()));
        let table = client
            .create(
                &Table {
                    table_reference: TableReference::new("p", "d", "t"),
                    schema: Some(TableSchema {
                        fields: vec![
                            TableFieldSchema::new("id", TableFieldType::Integer).required(),
                            TableFieldSchema::new("tags", TableFieldType::String).repeated(),
                        ],
                    }),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(table.num_rows, Some(0));
        assert!(!table.is_view());
    }

    #[tokio::test]
    #[serial]
    async fn test_create_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(rate_limited()))
            .expect(1)
            .mount(&server)
            .await;
        let client = BigqueryTableClient::new(mock_client(&server.uri()));
        let table = Table {
            table_reference: TableReference::new("p", "d", "t"),
            ..Default::default()
        };
        let err = client.create(&table, None).await.unwrap_err();
        assert_eq!(err.http_status(), Some(403));
    }

    #[tokio::test]
    #[serial]
    async fn test_get_with_view() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables/t"))
            .and(query_param("view", "STORAGE_STATS"))
            .respond_with(ResponseTemplate::new(403).set_body_json(rate_limited()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables/t"))
            .and(query_param("view", "STORAGE_STATS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "t"},
                "numBytes": "2048",
                "type": "VIEW",
                "view": {"query": "SELECT 1", "useLegacySql": false}
            })))
            .mount(&server)
            .await;

        let client = BigqueryTableClient::new(mock_client(&server.uri()));
        let req = GetTableRequest {
            view: Some(TableMetadataView::StorageStats),
            ..Default::default()
        };
        let table = client.get(&TableReference::new("p", "d", "t"), &req, None).await.unwrap();
        assert_eq!(table.num_bytes, Some(2048));
        assert!(table.is_view());
    }

    #[tokio::test]
    #[serial]
    async fn test_update_sends_etag() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables/t"))
            .and(header("If-Match", "e1"))
            .and(body_json(json!({"friendlyName": "Events", "expirationTime": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "etag": "e2",
                "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "t"},
                "friendlyName": "Events"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryTableClient::new(mock_client(&server.uri()));
        let table = Table {
            etag: "e1".to_string(),
            table_reference: TableReference::new("p", "d", "t"),
            expiration_time: Some(1_800_000_000_000),
            ..Default::default()
        };
        let updated = client
            .update(
                &table,
                |t| {
                    t.set_name(Some("Events".to_string()));
                    t.set_expiration(None);
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.etag, "e2");
        assert_eq!(updated.friendly_name.as_deref(), Some("Events"));
    }

    #[tokio::test]
    #[serial]
    async fn test_precondition_failed() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(412).set_body_json(json!({
                "error": {"code": 412, "message": "Precondition check failed.", "status": "FAILED_PRECONDITION"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = BigqueryTableClient::new(mock_client(&server.uri()));
        let table = Table {
            etag: "stale".to_string(),
            table_reference: TableReference::new("p", "d", "t"),
            description: Some("x".to_string()),
            ..Default::default()
        };
        let err = client.patch(&table, None).await.unwrap_err();
        assert_eq!(err.http_status(), Some(412));
    }

    #[tokio::test]
    #[serial]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables/t"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let client = BigqueryTableClient::new(mock_client(&server.uri()));
        client.delete(&TableReference::new("p", "d", "t"), None).await.unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn test_list_stream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables"))
            .and(query_param("pageToken", "next"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tables": [{"tableReference": {"projectId": "p", "datasetId": "d", "tableId": "b"}, "type": "VIEW"}],
                "nextPageToken": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tables": [{"tableReference": {"projectId": "p", "datasetId": "d", "tableId": "a"}, "type": "TABLE"}],
                "nextPageToken": "next",
                "totalItems": 2
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let client = BigqueryTableClient::new(mock_client(&server.uri()));
        let req = ListTablesRequest::default();
        let tables: Vec<String> = client
            .list_stream("p", "d", &req)
            .map(|t| t.unwrap().table_reference.table_id)
            .collect()
            .await;
        assert_eq!(tables, vec!["a", "b"]);
    }
}
