use std::collections::HashMap;

use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::dataset::DatasetReference;
use crate::http::job::JobReference;
use crate::http::table::TableSchema;
use crate::http::tabledata::list::Tuple;
use crate::http::types::{ErrorProto, QueryParameter};

/// Runs a query synchronously, waiting at most `timeout_ms` for the first page of results.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// A query string to execute, using Google Standard SQL or legacy SQL syntax.
    /// Example: "SELECT COUNT(f1) FROM myProjectId.myDatasetId.myTableId".
    pub query: String,
    /// The maximum number of rows of data to return per page of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dataset: Option<DatasetReference>,
    /// How long to wait for the query to complete, in milliseconds, before the request times out and returns.
    /// The call is not guaranteed to wait for the specified timeout; it typically returns after around 200 seconds (200,000 milliseconds),
    /// even if the query is not complete. If the query does not finish, `jobComplete` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_query_cache: Option<bool>,
    /// Unlike jobs, the synchronous endpoint is sent standard SQL by default.
    pub use_legacy_sql: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_parameters: Vec<QueryParameter>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_bytes_billed: Option<i64>,
    /// Makes the request idempotent: a retry with the same id does not start a second query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub kind: String,
    /// Present only when the query completes successfully.
    pub schema: Option<TableSchema>,
    pub job_reference: JobReference,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub total_rows: Option<i64>,
    pub page_token: Option<String>,
    pub rows: Option<Vec<Tuple>>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub total_bytes_processed: Option<i64>,
    #[serde(default)]
    pub job_complete: bool,
    pub errors: Option<Vec<ErrorProto>>,
    pub cache_hit: Option<bool>,
    #[serde(default, deserialize_with = "google_cloud_gax::http::from_str_option")]
    pub num_dml_affected_rows: Option<i64>,
}

pub(crate) fn build(base_url: &str, client: &Client, project_id: &str, data: &QueryRequest) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}/queries");
    client.post(url).json(data)
}
