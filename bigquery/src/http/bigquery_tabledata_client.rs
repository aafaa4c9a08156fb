use std::sync::Arc;

use futures_util::Stream;
use serde::Serialize;

use google_cloud_gax::paging;
use google_cloud_gax::retry::invoke;

use crate::http::bigquery_client::BigqueryClient;
use crate::http::table::TableReference;
use crate::http::tabledata;
use crate::http::tabledata::insert_all::{InsertAllRequest, InsertAllResponse};
use crate::http::tabledata::list::{FetchDataRequest, FetchDataResponse, Tuple};
use crate::http::{CancellationToken, Error};

#[derive(Debug, Clone)]
pub struct BigqueryTabledataClient {
    inner: Arc<BigqueryClient>,
}

impl BigqueryTabledataClient {
    pub fn new(inner: Arc<BigqueryClient>) -> Self {
        Self { inner }
    }

    /// Streams rows into the table. Retried only when every row has an insert id.
    /// Rows rejected by the server are reported in [`InsertAllResponse::insert_errors`], not as an `Err`.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn insert<T: Serialize + Sync>(
        &self,
        table: &TableReference,
        req: &InsertAllRequest<T>,
        cancel: Option<CancellationToken>,
    ) -> Result<InsertAllResponse, Error> {
        let retry = self.inner.retry_if(req.is_deduplicated());
        let action = || async move {
            let builder = tabledata::insert_all::build(self.inner.endpoint(), self.inner.http(), table, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&retry), action).await
    }

    /// One page of rows.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn read(
        &self,
        table: &TableReference,
        req: &FetchDataRequest,
        cancel: Option<CancellationToken>,
    ) -> Result<FetchDataResponse, Error> {
        let action = || async move {
            let builder = tabledata::list::build(self.inner.endpoint(), self.inner.http(), table, req);
            self.inner.send(builder).await
        };
        invoke(cancel.as_ref(), Some(&self.inner.retry_if(true)), action).await
    }

    /// Rows from `req.start_index` to the end of the table. `max_results` is the page size.
    pub fn read_stream<'a>(
        &'a self,
        table: &'a TableReference,
        req: &'a FetchDataRequest,
    ) -> impl Stream<Item = Result<Tuple, Error>> + 'a {
        paging::stream(req.page_token.clone(), move |page_token| async move {
            // The start index only applies to the first page.
            let req = match page_token {
                Some(page_token) => FetchDataRequest {
                    page_token: Some(page_token),
                    start_index: None,
                    ..req.clone()
                },
                None => req.clone(),
            };
            self.read(table, &req, None).await
        })
    }
}

#[cfg(test)]
mod test {
    use futures_util::TryStreamExt;
    use serde_json::json;
    use serial_test::serial;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::bigquery_client::test::{mock_client, rate_limited};
    use crate::http::bigquery_tabledata_client::BigqueryTabledataClient;
    use crate::http::table::TableReference;
    use crate::http::tabledata::insert_all::{InsertAllRequest, Row};
    use crate::http::tabledata::list::{FetchDataRequest, Value};

    #[derive(serde::Serialize)]
    struct Visit {
        page: &'static str,
        count: i64,
    }

    #[tokio::test]
    #[serial]
    async fn test_insert_with_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables/t/insertAll"))
            .and(body_json(json!({
                "skipInvalidRows": true,
                "rows": [
                    {"insertId": "1", "json": {"page": "/", "count": 1}},
                    {"insertId": "2", "json": {"page": "/about", "count": -1}}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "bigquery#tableDataInsertAllResponse",
                "insertErrors": [{"index": 1, "errors": [{"reason": "invalid", "message": "count"}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryTabledataClient::new(mock_client(&server.uri()));
        let req = InsertAllRequest {
            skip_invalid_rows: Some(true),
            rows: vec![
                Row {
                    insert_id: Some("1".to_string()),
                    json: Visit { page: "/", count: 1 },
                },
                Row {
                    insert_id: Some("2".to_string()),
                    json: Visit {
                        page: "/about",
                        count: -1,
                    },
                },
            ],
            ..Default::default()
        };
        let response = client.insert(&TableReference::new("p", "d", "t"), &req, None).await.unwrap();
        assert!(!response.is_success());
        let errors = response.insert_errors.unwrap();
        assert_eq!(errors[0].index, 1);
        assert_eq!(errors[0].errors[0].reason.as_deref(), Some("invalid"));
    }

    #[tokio::test]
    #[serial]
    async fn test_insert_without_ids_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(rate_limited()))
            .expect(1)
            .mount(&server)
            .await;
        let client = BigqueryTabledataClient::new(mock_client(&server.uri()));
        let req = InsertAllRequest {
            rows: vec![Row {
                insert_id: None,
                json: Visit { page: "/", count: 1 },
            }],
            ..Default::default()
        };
        assert!(client.insert(&TableReference::new("p", "d", "t"), &req, None).await.is_err());
    }

    #[tokio::test]
    #[serial]
    async fn test_read_stream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables/t/data"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalRows": "3",
                "rows": [{"f": [{"v": "c"}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/bigquery/v2/projects/p/datasets/d/tables/t/data"))
            .and(query_param("startIndex", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalRows": "3",
                "pageToken": "p2",
                "rows": [{"f": [{"v": "a"}]}, {"f": [{"v": "b"}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BigqueryTabledataClient::new(mock_client(&server.uri()));
        let table = TableReference::new("p", "d", "t");
        let req = FetchDataRequest {
            start_index: Some(1),
            max_results: Some(2),
            ..Default::default()
        };
        let rows: Vec<_> = client.read_stream(&table, &req).try_collect().await.unwrap();
        let values: Vec<Value> = rows.into_iter().map(|mut r| r.f.remove(0).v).collect();
        assert_eq!(
            values,
            vec![
                Value::String("a".to_string()),
                Value::String("b".to_string()),
                Value::String("c".to_string())
            ]
        );
    }
}
